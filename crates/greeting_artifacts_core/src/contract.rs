use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

pub const FIRST_NAME_FIELD: &str = "first_name";
pub const LAST_NAME_FIELD: &str = "last_name";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GreetingRequest {
    pub first_name: String,
    pub last_name: String,
}

impl GreetingRequest {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn greeting(&self) -> String {
        greeting_message(&self.first_name, &self.last_name)
    }
}

pub fn greeting_message(first_name: &str, last_name: &str) -> String {
    format!("Hello {first_name} {last_name}!")
}

/// Extracts a [`GreetingRequest`] from an already-normalized JSON object.
///
/// Field values are taken verbatim; only absence (or `null`) and non-string
/// values are rejected.
pub fn parse_request(payload: &Value) -> Result<GreetingRequest, ValidationError> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationError::MalformedPayload(
            "Request payload must be a JSON object".to_string(),
        ));
    };

    Ok(GreetingRequest {
        first_name: required_string(object, FIRST_NAME_FIELD)?,
        last_name: required_string(object, LAST_NAME_FIELD)?,
    })
}

fn required_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ValidationError::InvalidField {
            field,
            expected: "string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn greeting_joins_both_names() {
        let request = GreetingRequest::new("Jane", "Doe");
        assert_eq!(request.greeting(), "Hello Jane Doe!");
    }

    #[test]
    fn parse_request_reads_both_fields() {
        let request = parse_request(&json!({"first_name": "Jane", "last_name": "Doe"}))
            .expect("request should parse");
        assert_eq!(request, GreetingRequest::new("Jane", "Doe"));
    }

    #[test]
    fn parse_request_ignores_unknown_fields() {
        let request = parse_request(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "title": "Countess"
        }))
        .expect("request should parse");
        assert_eq!(request.greeting(), "Hello Ada Lovelace!");
    }

    #[test]
    fn parse_request_reports_missing_last_name() {
        let error = parse_request(&json!({"first_name": "Jane"})).expect_err("should fail");
        assert_eq!(error, ValidationError::MissingField(LAST_NAME_FIELD));
        assert_eq!(error.to_string(), "Missing required field 'last_name'");
    }

    #[test]
    fn parse_request_treats_null_as_missing() {
        let error = parse_request(&json!({"first_name": null, "last_name": "Doe"}))
            .expect_err("should fail");
        assert_eq!(error, ValidationError::MissingField(FIRST_NAME_FIELD));
    }

    #[test]
    fn parse_request_rejects_non_string_values() {
        let error = parse_request(&json!({"first_name": "Jane", "last_name": 7}))
            .expect_err("should fail");
        assert_eq!(
            error,
            ValidationError::InvalidField {
                field: LAST_NAME_FIELD,
                expected: "string",
            }
        );
    }

    #[test]
    fn parse_request_rejects_non_object_payload() {
        let error = parse_request(&json!(["Jane", "Doe"])).expect_err("should fail");
        assert!(matches!(error, ValidationError::MalformedPayload(_)));
    }
}
