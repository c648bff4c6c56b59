//! JSON bodies exchanged with the registration endpoint

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response body of the registration endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiResponse {
    pub fn accepted(id: String, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: Some(id),
            errors: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted() {
        let json = serde_json::to_string(&ApiResponse::rejected("Method not allowed")).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"Method not allowed"}"#);
    }

    #[test]
    fn test_deserialize_with_errors() {
        let body = r#"{"success":false,"message":"invalid","errors":{"email":"taken"}}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.errors.unwrap()["email"], "taken");
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"success":true,"id":"m1"}"#).unwrap();
        assert_eq!(parsed.message, "");
        assert_eq!(parsed.id.as_deref(), Some("m1"));
    }
}
