//! maplink CLI - inspect commands, peer results and event logs.
//!
//! # Subcommands
//!
//! - `render <JSON>`: print the script a command sends to the peer
//! - `decode [RAW]`: decode a raw peer result (omit RAW for "nothing")
//! - `replay <FILE>`: run an event log through the event processor
//! - `config`: print the effective configuration
//!
//! # Configuration
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`MAPLINK_*`)
//! 3. Project config (`.maplink/config.toml` in the project directory)
//! 4. Global config (`~/.maplink/config.toml`)
//! 5. Default values (lowest priority)

mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maplink_runtime::{Command, ConfigLoader, MaplinkConfig, ReturnValue};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// maplink CLI - inspect commands, peer results and event logs
#[derive(Parser, Debug)]
#[command(name = "maplink")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Override the double-tap sensitivity in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    double_tap_ms: Option<u64>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the script a command renders to
    Render {
        /// Command as JSON, e.g. '{"op":"set_zoom","zoom":3}'
        json: String,
    },
    /// Decode a raw peer result
    Decode {
        /// Raw result as JSON text; omit when the peer returned nothing
        raw: Option<String>,
    },
    /// Replay a JSON-lines event log through the event processor
    Replay {
        /// Log file with one {"name","payload","at_ms"} object per line
        file: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn load_config(args: &Args) -> Result<MaplinkConfig> {
    let project_root = match &args.project {
        Some(p) => p.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let mut config = ConfigLoader::new()
        .with_project_root(&project_root)
        .load()
        .context("config error")?;

    if args.debug {
        config.debug = true;
    }
    if let Some(ms) = args.double_tap_ms {
        config.events.double_tap_sensitivity_ms = ms;
    }
    Ok(config)
}

fn init_tracing(args: &Args, config: &MaplinkConfig) {
    // --debug > --verbose > RUST_LOG > "warn"
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

fn render(json: &str) -> Result<String> {
    let command: Command = serde_json::from_str(json).context("invalid command")?;
    debug!(op = command.op(), "rendering command");
    Ok(format!(
        "{}\nprimitive: {}",
        command.render(),
        command.is_primitive_return()
    ))
}

fn decode(raw: Option<&str>) -> Result<String> {
    let raw = raw
        .map(|text| serde_json::from_str(text).context("raw result is not JSON"))
        .transpose()?;
    let value = ReturnValue::decode(raw)?;
    Ok(serde_json::to_string(&value)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_tracing(&args, &config);

    match &args.command {
        Cmd::Render { json } => println!("{}", render(json)?),
        Cmd::Decode { raw } => println!("{}", decode(raw.as_deref())?),
        Cmd::Replay { file } => {
            let log = std::fs::read_to_string(file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            for line in replay::replay(&log, &config).await? {
                println!("{line}");
            }
        }
        Cmd::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}
