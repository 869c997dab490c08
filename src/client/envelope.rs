//! Generic response envelope shared by every KeyWarden endpoint.
//!
//! Each service reply is a flat JSON object from which a single operation
//! extracts one documented field. An absent or mistyped field is a defined
//! failure (`MalformedEnvelope`), never a panic.

use serde_json::{Map, Value};

use crate::errors::{ApiError, ApiResult};

/// A parsed service reply: string keys mapping to JSON values.
#[derive(Debug)]
pub(crate) struct Envelope(Map<String, Value>);

impl Envelope {
    /// Parse a raw success body into an envelope.
    ///
    /// An empty (or whitespace-only) body is reported as `EmptyBody` so the
    /// caller can distinguish it from a body that failed to parse.
    pub(crate) fn parse(raw: &str) -> ApiResult<Self> {
        if raw.trim().is_empty() {
            return Err(ApiError::EmptyBody);
        }

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ApiError::MalformedEnvelope(format!("invalid JSON: {e}")))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::MalformedEnvelope(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Extract a string field.
    pub(crate) fn str_field(&self, key: &str) -> ApiResult<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::missing_field(key, "string"))
    }

    /// Extract a boolean field.
    pub(crate) fn bool_field(&self, key: &str) -> ApiResult<bool> {
        self.0
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| ApiError::missing_field(key, "boolean"))
    }

    /// Extract an integer field.
    pub(crate) fn int_field(&self, key: &str) -> ApiResult<i64> {
        self.0
            .get(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| ApiError::missing_field(key, "integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_object() {
        let envelope = Envelope::parse(r#"{"access_key": "tok123", "result": true, "activations_left": 5}"#)
            .expect("parse failed");

        assert_eq!(envelope.str_field("access_key").unwrap(), "tok123");
        assert!(envelope.bool_field("result").unwrap());
        assert_eq!(envelope.int_field("activations_left").unwrap(), 5);
    }

    #[test]
    fn empty_body_is_its_own_failure() {
        assert!(matches!(Envelope::parse(""), Err(ApiError::EmptyBody)));
        assert!(matches!(Envelope::parse("   \n"), Err(ApiError::EmptyBody)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            Envelope::parse("{not json"),
            Err(ApiError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn non_object_body_is_malformed() {
        assert!(matches!(
            Envelope::parse(r#"["a", "b"]"#),
            Err(ApiError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            Envelope::parse("42"),
            Err(ApiError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn missing_field_is_malformed() {
        let envelope = Envelope::parse(r#"{"other": 1}"#).unwrap();
        assert!(matches!(
            envelope.str_field("access_key"),
            Err(ApiError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn mistyped_field_is_malformed() {
        let envelope = Envelope::parse(r#"{"result": "yes", "activations_left": "5"}"#).unwrap();

        // A string is not boolean-coercible.
        assert!(envelope.bool_field("result").is_err());
        // Nor is a quoted number an integer.
        assert!(envelope.int_field("activations_left").is_err());
    }

    #[test]
    fn zero_is_a_valid_integer() {
        let envelope = Envelope::parse(r#"{"activations_left": 0}"#).unwrap();
        assert_eq!(envelope.int_field("activations_left").unwrap(), 0);
    }
}
