use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::consts::MAX_EMAIL_LENGTH;

// ============================================
// Activity API Models
// ============================================

/// One activity as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ActivityResponse {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Registered participant emails
    pub participants: Vec<String>,
}

/// All activities keyed by activity name
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = std::collections::HashMap<String, ActivityResponse>)]
pub struct ActivitiesResponse(pub IndexMap<String, ActivityResponse>);

/// Confirmation returned after a successful signup or unregister
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query string carried by signup and unregister requests
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Participant email address (percent-encoded)
    pub email: Option<String>,
}

impl EmailQuery {
    /// Return the trimmed email, or a message describing why it is unusable
    pub fn validate(&self) -> Result<&str, String> {
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| "email query parameter is required".to_string())?;

        if email.len() > MAX_EMAIL_LENGTH {
            return Err(format!(
                "email must be at most {} characters",
                MAX_EMAIL_LENGTH
            ));
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| format!("'{email}' is not a valid email address"))?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || email.chars().any(char::is_whitespace)
        {
            return Err(format!("'{email}' is not a valid email address"));
        }

        Ok(email)
    }
}

// ============================================
// Error Models
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: String, error_type: String) -> Self {
        Self {
            error: ErrorDetail {
                message,
                r#type: error_type,
                param: None,
                code: None,
            },
        }
    }

    pub fn with_param(message: String, error_type: String, param: String) -> Self {
        Self {
            error: ErrorDetail {
                message,
                r#type: error_type,
                param: Some(param),
                code: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(email: &str) -> EmailQuery {
        EmailQuery {
            email: Some(email.to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_plain_address() {
        assert_eq!(query("test@example.com").validate(), Ok("test@example.com"));
        assert_eq!(query("a+b@example.com").validate(), Ok("a+b@example.com"));
    }

    #[test]
    fn test_validate_trims_whitespace() {
        assert_eq!(
            query("  emma@mergington.edu \n").validate(),
            Ok("emma@mergington.edu")
        );
    }

    #[test]
    fn test_validate_rejects_missing_or_blank() {
        assert!(EmailQuery::default().validate().is_err());
        assert!(query("   ").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed() {
        for bad in ["no-at-sign", "@example.com", "user@", "a@b@c", "sp ace@example.com"] {
            assert!(query(bad).validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_overlong() {
        let email = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(query(&email).validate().is_err());
    }

    #[test]
    fn test_activities_response_serializes_as_map() {
        let mut activities = IndexMap::new();
        activities.insert(
            "Chess Club".to_string(),
            ActivityResponse {
                description: "Learn strategies".to_string(),
                schedule: "Fridays".to_string(),
                max_participants: 12,
                participants: vec!["test@example.com".to_string()],
            },
        );

        let json = serde_json::to_value(ActivitiesResponse(activities)).unwrap();
        assert_eq!(json["Chess Club"]["max_participants"], 12);
        assert_eq!(json["Chess Club"]["participants"][0], "test@example.com");
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::with_param(
            "bad".to_string(),
            "invalid_email".to_string(),
            "email".to_string(),
        ))
        .unwrap();
        assert_eq!(json["error"]["type"], "invalid_email");
        assert_eq!(json["error"]["param"], "email");
        assert!(json["error"]["code"].is_null());
    }
}
