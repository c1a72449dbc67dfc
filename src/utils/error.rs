use thiserror::Error;

#[derive(Error, Debug)]
pub enum BmkgError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] roxmltree::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("No proxy route matches path: {path}")]
    RouteNotFound { path: String },

    #[error("Unexpected payload: expected {expected}, got {actual}")]
    UnexpectedPayload { expected: String, actual: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BmkgError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BmkgError::ApiError(_) => ErrorCategory::Network,
            BmkgError::XmlError(_)
            | BmkgError::SerializationError(_)
            | BmkgError::CsvError(_)
            | BmkgError::UnexpectedPayload { .. } => ErrorCategory::Parsing,
            BmkgError::ConfigError { .. }
            | BmkgError::InvalidConfigValueError { .. }
            | BmkgError::MissingConfigError { .. }
            | BmkgError::RouteNotFound { .. } => ErrorCategory::Configuration,
            BmkgError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // upstream hiccups are worth trying again later
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parsing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BmkgError::ApiError(e) if e.is_decode() => {
                "BMKG returned a body that could not be decoded".to_string()
            }
            BmkgError::ApiError(e) => match e.status() {
                Some(status) => format!("BMKG responded with HTTP {}", status),
                None => "Could not reach the BMKG service".to_string(),
            },
            BmkgError::XmlError(_) => "The earthquake bulletin is not valid XML".to_string(),
            BmkgError::SerializationError(_) => {
                "The forecast response has an unexpected shape".to_string()
            }
            BmkgError::CsvError(_) => "Failed to write CSV output".to_string(),
            BmkgError::IoError(e) => format!("File system error: {}", e),
            BmkgError::ConfigError { message } => format!("Configuration problem: {}", message),
            BmkgError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            BmkgError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            BmkgError::RouteNotFound { path } => {
                format!("No upstream is configured for '{}'", path)
            }
            BmkgError::UnexpectedPayload { expected, actual } => {
                format!("Expected a {} response but received {}", expected, actual)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again later",
            ErrorCategory::Parsing => "The upstream format may have changed; rerun with --verbose",
            ErrorCategory::Configuration => {
                "Review the configuration file and the [[proxy.routes]] entries"
            }
            ErrorCategory::Io => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, BmkgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_errors_are_configuration_problems() {
        let err = BmkgError::RouteNotFound {
            path: "/unknown".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("/unknown"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = BmkgError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_json_errors_are_parsing_problems() {
        let err = BmkgError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(err.category(), ErrorCategory::Parsing);
    }
}
