//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.maplink/config.toml`)
//! 3. Project config (`.maplink/config.toml`)
//! 4. Environment variables (`MAPLINK_*`)
//!
//! Each layer overrides the previous. The result is validated last.

use super::{
    default_config_path, ConfigError, MaplinkConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Helper macro for parsing numeric environment variables.
macro_rules! parse_env_num {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_env_var($var, "expected unsigned integer"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use maplink_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), maplink_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.maplink/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.maplink/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read
    /// or parsed, an environment variable is malformed, or the merged
    /// result fails validation. Missing files are ignored.
    pub fn load(&self) -> Result<MaplinkConfig, ConfigError> {
        let mut layered = toml::Table::new();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                merge_tables(&mut layered, global_config);
            }
        }

        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "Loaded project config"
                    );
                    merge_tables(&mut layered, project_config);
                }
            }
        }

        let mut config = MaplinkConfig::from_table(layered)
            .map_err(|e| ConfigError::invalid_value("config", e.to_string()))?;

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Loads a config file as a raw table, returning None if it doesn't exist.
///
/// The text is also checked against [`MaplinkConfig`] so that type errors
/// name the offending file.
fn load_file(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    MaplinkConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    let table = content
        .parse::<toml::Table>()
        .map_err(|e| ConfigError::parse_toml(path, e))?;

    Ok(Some(table))
}

/// Overlays `overlay` onto `base`. Keys present in `overlay` win, even when
/// they restate a default; nested tables merge key by key.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(inner) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, inner),
                _ => {
                    base.insert(key, toml::Value::Table(inner));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Applies environment variable overrides.
fn apply_env_vars(config: &mut MaplinkConfig) -> Result<(), ConfigError> {
    parse_env_bool!(config.debug, "MAPLINK_DEBUG");

    parse_env_num!(
        config.events.double_tap_sensitivity_ms,
        "MAPLINK_DOUBLE_TAP_MS"
    );
    parse_env_num!(config.events.record_capacity, "MAPLINK_RECORD_CAPACITY");
    parse_env_num!(config.events.queue_capacity, "MAPLINK_EVENT_QUEUE_CAPACITY");
    parse_env_num!(
        config.executor.queue_capacity,
        "MAPLINK_EXECUTOR_QUEUE_CAPACITY"
    );

    if let Ok(val) = std::env::var("MAPLINK_BRIDGE_DEADLINE_MS") {
        config.bridge.deadline_ms = match val.trim() {
            "" | "none" | "off" => None,
            ms => Some(ms.parse().map_err(|_| {
                ConfigError::invalid_env_var("MAPLINK_BRIDGE_DEADLINE_MS", "expected milliseconds")
            })?),
        };
    }

    Ok(())
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect("defaults load");

        assert_eq!(config, MaplinkConfig::default());
    }

    #[test]
    fn load_global_config() {
        let temp = TempDir::new().expect("tempdir");
        let config_path = create_config_file(
            temp.path(),
            r#"
debug = true

[events]
double_tap_sensitivity_ms = 300
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&config_path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect("load");

        assert!(config.debug);
        assert_eq!(config.events.double_tap_sensitivity_ms, 300);
    }

    #[test]
    fn load_project_overrides_global() {
        let global_temp = TempDir::new().expect("tempdir");
        let project_temp = TempDir::new().expect("tempdir");

        let project_dir = project_temp.path().join(".maplink");
        std::fs::create_dir_all(&project_dir).expect("mkdir");

        let global_path = create_config_file(
            global_temp.path(),
            r#"
debug = true

[executor]
queue_capacity = 16
"#,
        );

        create_config_file(
            &project_dir,
            r#"
[executor]
queue_capacity = 8

[bridge]
deadline_ms = 2000
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .expect("load");

        assert!(config.debug);
        assert_eq!(config.executor.queue_capacity, 8);
        assert_eq!(config.bridge.deadline_ms, Some(2000));
    }

    #[test]
    fn project_can_restore_a_default_value() {
        let global_temp = TempDir::new().expect("tempdir");
        let project_temp = TempDir::new().expect("tempdir");
        let project_dir = project_temp.path().join(".maplink");
        std::fs::create_dir_all(&project_dir).expect("mkdir");

        let global_path = create_config_file(
            global_temp.path(),
            "[events]\nrecord_capacity = 50\ndouble_tap_sensitivity_ms = 250\n",
        );
        create_config_file(&project_dir, "[events]\nrecord_capacity = 20\n");

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .expect("load");

        assert_eq!(config.events.record_capacity, 20);
        assert_eq!(config.events.double_tap_sensitivity_ms, 250);
    }

    #[test]
    fn merge_tables_is_key_by_key() {
        let mut base: toml::Table = "debug = true\n[events]\nrecord_capacity = 50\n"
            .parse()
            .expect("valid toml");
        let overlay: toml::Table = "[events]\nqueue_capacity = 8\n"
            .parse()
            .expect("valid toml");

        merge_tables(&mut base, overlay);

        let config = MaplinkConfig::from_table(base).expect("valid config");
        assert!(config.debug);
        assert_eq!(config.events.record_capacity, 50);
        assert_eq!(config.events.queue_capacity, 8);
    }

    #[test]
    fn missing_config_files_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .expect("load");

        assert_eq!(config, MaplinkConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = create_config_file(temp.path(), "[events\nrecord_capacity = ");

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect_err("parse failure");
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().expect("tempdir");
        let path = create_config_file(temp.path(), "[events]\nrecord_capacity = 0\n");

        let err = ConfigLoader::new()
            .with_global_config(&path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect_err("validation failure");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));

        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));

        assert_eq!(parse_bool("invalid"), None);
    }
}
