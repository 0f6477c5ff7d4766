use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}")]
    HttpStatus {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl LookupError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Message suitable for printing to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::HttpError(_) | LookupError::HttpStatus { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            LookupError::IoError(_) => {
                "File operation failed. Please check file permissions.".to_string()
            }
            LookupError::SerializationError(_) => {
                "Stored data could not be read or written.".to_string()
            }
            LookupError::ConfigError { message } => format!("Configuration error: {}", message),
            LookupError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
