//! Error types for Stoa

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoaError>;

#[derive(Error, Debug)]
pub enum StoaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StoaError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StoaError::InvalidInput(_) => 3,
            StoaError::Api(_) => 1,
            StoaError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failures from the backend data layer.
///
/// All non-2xx responses collapse into `Status`; the client performs no
/// status-code-specific handling and no retries.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = StoaError::InvalidInput("Empty content".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_api_errors() {
        let network = StoaError::Api(ApiError::Network("Connection refused".to_string()));
        assert_eq!(network.exit_code(), 1);

        let status = StoaError::Api(ApiError::Status {
            status: 500,
            url: "http://localhost:8000/posts".to_string(),
        });
        assert_eq!(status.exit_code(), 1);

        let decode = StoaError::Api(ApiError::Decode("missing field `author`".to_string()));
        assert_eq!(decode.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let config_error = ConfigError::MissingField("api.base_url".to_string());
        let error = StoaError::Config(config_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_invalid_input() {
        let error = StoaError::InvalidInput("Content cannot be empty".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid input: Content cannot be empty"
        );
    }

    #[test]
    fn test_error_message_formatting_status() {
        let error = StoaError::Api(ApiError::Status {
            status: 404,
            url: "http://localhost:8000/posts/7".to_string(),
        });
        assert_eq!(
            format!("{}", error),
            "API error: Request failed with status 404: http://localhost:8000/posts/7"
        );
    }

    #[test]
    fn test_error_conversion_from_api_error() {
        let api_error = ApiError::Network("timeout".to_string());
        let error: StoaError = api_error.into();

        match error {
            StoaError::Api(_) => {}
            _ => panic!("Expected StoaError::Api"),
        }
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("test".to_string());
        let error: StoaError = config_error.into();

        match error {
            StoaError::Config(_) => {}
            _ => panic!("Expected StoaError::Config"),
        }
    }

    #[test]
    fn test_api_error_clone() {
        let original = ApiError::Network("Connection failed".to_string());
        let cloned = original.clone();

        assert_eq!(format!("{}", original), format!("{}", cloned));
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        let message = format!("{}", config_error);
        assert!(message.contains("Failed to read config file"));
    }
}
