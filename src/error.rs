use std::fmt;

/// Custom error type for TFE operations
#[derive(Debug)]
pub enum TfeError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// Token not found in any source
    TokenNotFound(String),
    /// Failed to read or parse credentials file
    Credentials(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// Data source configuration rejected before any API call
    Validation(String),
    /// A run ended in a state that cannot be recovered from
    Run(String),
}

impl TfeError {
    /// Prefix the message of an API or JSON error, keeping the variant.
    /// Transport errors keep their `reqwest::Error` source untouched.
    pub fn context(self, prefix: &str) -> Self {
        match self {
            TfeError::Api { status, message } => TfeError::Api {
                status,
                message: format!("{}: {}", prefix, message),
            },
            TfeError::Json(msg) => TfeError::Json(format!("{}: {}", prefix, msg)),
            other => other,
        }
    }
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Http(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::TokenNotFound(msg) => write!(f, "{}", msg),
            TfeError::Credentials(msg) => write!(f, "{}", msg),
            TfeError::Json(msg) => write!(f, "JSON error: {}", msg),
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfeError::Validation(msg) => write!(f, "Invalid configuration: {}", msg),
            TfeError::Run(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        TfeError::Http(err)
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for TfeError {
    fn from(err: std::io::Error) -> Self {
        TfeError::Credentials(err.to_string())
    }
}

impl From<std::env::VarError> for TfeError {
    fn from(err: std::env::VarError) -> Self {
        TfeError::Config(err.to_string())
    }
}

/// Result type alias for TFE operations
pub type Result<T> = std::result::Result<T, TfeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TfeError::TokenNotFound("test host".to_string());
        assert!(err.to_string().contains("test host"));
    }

    #[test]
    fn test_api_error_display() {
        let err = TfeError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TfeError>();
    }

    #[test]
    fn test_validation_error_display() {
        let err = TfeError::Validation("workspace_id and variable_set_id".to_string());
        assert!(err.to_string().starts_with("Invalid configuration"));
        assert!(err.to_string().contains("variable_set_id"));
    }

    #[test]
    fn test_run_error_display_is_bare() {
        let err = TfeError::Run("run errored during plan".to_string());
        assert_eq!(err.to_string(), "run errored during plan");
    }

    #[test]
    fn test_context_prefixes_api_message() {
        let err = TfeError::Api {
            status: 404,
            message: "Failed to fetch workspaces".to_string(),
        }
        .context("Error retrieving workspaces");
        match err {
            TfeError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Error retrieving workspaces: Failed to fetch workspaces");
            }
            _ => panic!("Expected TfeError::Api"),
        }
    }

    #[test]
    fn test_context_keeps_validation_untouched() {
        let err = TfeError::Validation("bad".to_string()).context("ignored");
        assert_eq!(err.to_string(), "Invalid configuration: bad");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TfeError = json_err.into();
        match err {
            TfeError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected TfeError::Json"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TfeError = io_err.into();
        match err {
            TfeError::Credentials(msg) => assert!(msg.contains("file not found")),
            _ => panic!("Expected TfeError::Credentials"),
        }
    }

    #[test]
    fn test_error_source_http() {
        use std::error::Error;
        let err = TfeError::Api {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(err.source().is_none());
    }
}
