//! Typed peer results.
//!
//! # Decode Table
//!
//! | Raw result | Decoded |
//! |------------|---------|
//! | nothing | [`ReturnValue::Null`] |
//! | `null`, `"null"` | [`ReturnValue::Unsupported`] |
//! | `{"a": 1, "b": 2.5}` | [`ReturnValue::StringNumberMap`] |
//! | `"{\"a\": 1}"` | [`ReturnValue::StringNumberMap`] |
//! | `"text"`, `"5"` | [`ReturnValue::String`] |
//! | `3.5` | [`ReturnValue::Number`] |
//! | `true` | [`ReturnValue::Bool`] |
//! | arrays, objects with non-number values | [`BridgeError::InvalidResultType`] |

use super::BridgeError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A decoded peer result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ReturnValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// Flat object of numbers, e.g. a camera center or bounds.
    StringNumberMap(BTreeMap<String, f64>),
    /// The peer returned `null`: the operation has no value to report.
    Unsupported,
    /// The peer returned nothing at all.
    Null,
}

impl ReturnValue {
    /// Decodes a raw peer result.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidResultType`] carrying the raw JSON text
    /// when the value is outside the decodable set.
    pub fn decode(raw: Option<Value>) -> Result<Self, BridgeError> {
        let Some(value) = raw else {
            return Ok(Self::Null);
        };

        match value {
            Value::Null => Ok(Self::Unsupported),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(ref n) => n
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| BridgeError::invalid_result(value.to_string())),
            Value::String(s) => Ok(Self::decode_text(s)),
            Value::Object(ref obj) => number_map(obj)
                .map(Self::StringNumberMap)
                .ok_or_else(|| BridgeError::invalid_result(value.to_string())),
            Value::Array(_) => Err(BridgeError::invalid_result(value.to_string())),
        }
    }

    /// Strings may carry a serialized number map; anything else stays text.
    fn decode_text(text: String) -> Self {
        if text == "null" {
            return Self::Unsupported;
        }
        if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(&text) {
            if let Some(map) = number_map(&obj) {
                return Self::StringNumberMap(map);
            }
        }
        Self::String(text)
    }

    /// Variant name, used in mismatch errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Bool(_) => "Bool",
            Self::StringNumberMap(_) => "StringNumberMap",
            Self::Unsupported => "Unsupported",
            Self::Null => "Null",
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            Self::StringNumberMap(m) => Some(m),
            _ => None,
        }
    }
}

fn number_map(obj: &Map<String, Value>) -> Option<BTreeMap<String, f64>> {
    obj.iter()
        .map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(v: Value) -> Result<ReturnValue, BridgeError> {
        ReturnValue::decode(Some(v))
    }

    #[test]
    fn nothing_is_null() {
        assert_eq!(ReturnValue::decode(None), Ok(ReturnValue::Null));
    }

    #[test]
    fn null_is_unsupported() {
        assert_eq!(decode(Value::Null), Ok(ReturnValue::Unsupported));
        assert_eq!(decode(json!("null")), Ok(ReturnValue::Unsupported));
    }

    #[test]
    fn primitives_pass_through() {
        assert_eq!(decode(json!(3.5)), Ok(ReturnValue::Number(3.5)));
        assert_eq!(decode(json!(12)), Ok(ReturnValue::Number(12.0)));
        assert_eq!(decode(json!(false)), Ok(ReturnValue::Bool(false)));
        assert_eq!(decode(json!("hello")), Ok(ReturnValue::String("hello".into())));
    }

    #[test]
    fn numeric_string_stays_string() {
        assert_eq!(decode(json!("5")), Ok(ReturnValue::String("5".into())));
        assert_eq!(decode(json!("true")), Ok(ReturnValue::String("true".into())));
    }

    #[test]
    fn number_object_becomes_map() {
        let v = decode(json!({"lng": 13.4, "lat": 52.5})).expect("map");
        let map = v.as_map().expect("map variant");
        assert_eq!(map["lng"], 13.4);
        assert_eq!(map["lat"], 52.5);
    }

    #[test]
    fn serialized_number_object_becomes_map() {
        let v = decode(json!(r#"{"a":1,"b":2}"#)).expect("map");
        assert_eq!(v.as_map().map(BTreeMap::len), Some(2));
    }

    #[test]
    fn string_with_mixed_object_stays_string() {
        let text = r#"{"a":"x"}"#;
        assert_eq!(decode(json!(text)), Ok(ReturnValue::String(text.into())));
    }

    #[test]
    fn invalid_shapes_carry_raw_text() {
        assert_eq!(
            decode(json!([1, 2])),
            Err(BridgeError::invalid_result("[1,2]"))
        );
        assert_eq!(
            decode(json!({"a": "x"})),
            Err(BridgeError::invalid_result(r#"{"a":"x"}"#))
        );
        assert!(decode(json!({"a": {"b": 1}})).is_err());
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(ReturnValue::Number(2.0)).expect("serialize");
        assert_eq!(json, json!({"type": "Number", "value": 2.0}));
        let json = serde_json::to_value(ReturnValue::Null).expect("serialize");
        assert_eq!(json, json!({"type": "Null"}));
    }
}
