//! Script text helpers.
//!
//! Every caller-supplied value enters script text as a JSON literal, which is
//! also a valid script literal. Quotes, backslashes and line separators are
//! escaped by `serde_json`; non-finite numbers become `null`.

use maplink_types::{EdgeInsets, LngLat, LngLatBounds};
use serde::Serialize;
use serde_json::{Map, Value};

/// Renders a value as a literal.
pub(crate) fn lit<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Renders a string as a quoted, escaped literal.
pub(crate) fn quote(s: &str) -> String {
    lit(s)
}

/// Appends the completion statement used by non-primitive commands.
///
/// The completion goes on its own line so that a caller statement without
/// a trailing `;` still parses.
pub(crate) fn with_null_completion(statement: String) -> String {
    format!("{statement}\nnull;")
}

/// Builds a camera options object, skipping unset fields.
#[derive(Default)]
pub(crate) struct CameraOptions(Map<String, Value>);

impl CameraOptions {
    pub(crate) fn center(mut self, center: Option<LngLat>) -> Self {
        if let Some(c) = center {
            self.0.insert("center".into(), Value::from(c.to_array().to_vec()));
        }
        self
    }

    pub(crate) fn number(mut self, key: &str, value: Option<f64>) -> Self {
        if let Some(v) = value {
            self.0.insert(key.into(), Value::from(v));
        }
        self
    }

    pub(crate) fn duration(mut self, duration_ms: Option<u64>) -> Self {
        if let Some(ms) = duration_ms {
            self.0.insert("duration".into(), Value::from(ms));
        }
        self
    }

    pub(crate) fn padding(mut self, padding: EdgeInsets) -> Self {
        if padding != EdgeInsets::default() {
            let mut p = Map::new();
            p.insert("top".into(), Value::from(padding.top));
            p.insert("right".into(), Value::from(padding.right));
            p.insert("bottom".into(), Value::from(padding.bottom));
            p.insert("left".into(), Value::from(padding.left));
            self.0.insert("padding".into(), Value::Object(p));
        }
        self
    }

    pub(crate) fn render(self) -> String {
        lit(&Value::Object(self.0))
    }
}

/// Renders bounds as `[[west, south], [east, north]]`.
pub(crate) fn bounds(b: LngLatBounds) -> String {
    lit(&b.to_array())
}
