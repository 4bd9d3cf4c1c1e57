use thiserror::Error;

/// Result type alias for UDDR operations
pub type Result<T> = std::result::Result<T, UddrError>;

/// Errors that can occur when using the UDDR API
#[derive(Error, Debug)]
pub enum UddrError {
    /// A parameter was not one of its accepted values
    #[error("{operation}: {field} '{value}' must be one of {accepted}")]
    InvalidChoice {
        /// Operation that rejected the value
        operation: String,
        /// Name of the parameter
        field: &'static str,
        /// The rejected value
        value: String,
        /// Accepted values, comma separated
        accepted: String,
    },

    /// A date string matched neither accepted format
    #[error("{field}: invalid date '{value}', expected 'YYYY-MM-DD' or 'YYYY-MM-DDTHH:MM:SS.sssZ'")]
    InvalidDate {
        /// Name of the parameter
        field: String,
        /// The rejected value
        value: String,
    },

    /// A filter is missing a required part
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Indicator is neither an IP address nor a hostname
    #[error("'{0}' is not a valid IP address or hostname")]
    InvalidIndicator(String),

    /// Domain name failed validation
    #[error("'{0}' is not a valid domain name")]
    InvalidDomain(String),

    /// Required configuration is missing
    #[error("configuration error: {0}")]
    Config(String),

    /// The account has no organizations
    #[error("no organizations found for this user")]
    NoOrganizations,

    /// The requested organization does not exist on the account
    #[error("organization '{0}' not found for this user")]
    UnknownOrganization(String),

    /// Several organizations exist and none was chosen
    #[error("multiple organizations found, specify one of: {}", .0.join(", "))]
    AmbiguousOrganization(Vec<String>),

    /// Authentication failed - invalid or missing API key
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Response could not be reshaped into the requested format
    #[error("format error: {0}")]
    Format(String),
}

impl UddrError {
    /// Returns true if the error was raised before any request was sent
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidChoice { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidFilter(_)
                | Self::InvalidIndicator(_)
                | Self::InvalidDomain(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_choice_message_lists_accepted_values() {
        let err = UddrError::InvalidChoice {
            operation: "bar".into(),
            field: "query_type",
            value: "FOO".into(),
            accepted: "BLOCK_QUERIES, NO_ANSWER_QUERIES".into(),
        };
        assert_eq!(
            err.to_string(),
            "bar: query_type 'FOO' must be one of BLOCK_QUERIES, NO_ANSWER_QUERIES"
        );
        assert!(err.is_validation_error());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(UddrError::Unauthorized.status_code(), Some(401));
        assert!(UddrError::Unauthorized.is_auth_error());
        let err = UddrError::Api {
            code: 500,
            message: "boom".into(),
        };
        assert_eq!(err.status_code(), Some(500));
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_ambiguous_organization_message() {
        let err = UddrError::AmbiguousOrganization(vec!["Acme".into(), "Globex".into()]);
        assert_eq!(
            err.to_string(),
            "multiple organizations found, specify one of: Acme, Globex"
        );
    }
}
