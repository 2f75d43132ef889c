//! Error taxonomy shared by the client, controllers and UI.

use std::fmt;

use thiserror::Error;

/// A single field that failed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Local pre-submit validation failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record `field` as missing when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Every way a request or submit can fail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a failure status or `success: false`
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// A success response whose body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Local validation blocked the request
    #[error("{0}")]
    Validation(ValidationErrors),
}

impl ApiError {
    pub fn decode(err: impl fmt::Display) -> Self {
        ApiError::Decode(err.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Backend { status: 401, .. })
    }

    /// Text for the notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Backend { status: 401, .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::Backend { status: 403, message } if message.is_empty() => {
                "You do not have permission to perform this action.".to_string()
            }
            ApiError::Backend { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server returned an unexpected response.".to_string(),
            ApiError::Validation(errors) => errors.to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_records_blank_fields() {
        let mut errors = ValidationErrors::new();
        errors.require("title", "  ", "Title");
        errors.require("categoryId", "c1", "Category");
        assert!(errors.contains("title"));
        assert!(!errors.contains("categoryId"));
        assert_eq!(errors.to_string(), "Title is required");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_user_messages() {
        let err = ApiError::Backend {
            status: 400,
            message: "Slug already in use".into(),
        };
        assert_eq!(err.user_message(), "Slug already in use");
        assert!(!err.is_unauthorized());

        let err = ApiError::Backend {
            status: 401,
            message: String::new(),
        };
        assert!(err.is_unauthorized());
        assert!(err.user_message().contains("sign in"));

        assert!(ApiError::Network("dns".into())
            .user_message()
            .contains("server"));
    }
}
