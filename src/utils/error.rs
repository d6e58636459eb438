use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl DeliveryError {
    /// Short message for the console, without the error-kind prefix.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DeliveryError::IoError(e) => format!("File access failed: {}", e),
            DeliveryError::CsvError(e) => format!("Could not read delimited data: {}", e),
            DeliveryError::ConfigParseError { message } => {
                format!("Configuration file is not valid: {}", message)
            }
            DeliveryError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting {} = '{}' is not accepted: {}", field, value, reason),
            DeliveryError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DeliveryError::IoError(_) => "Check that the file exists and is readable/writable",
            DeliveryError::CsvError(_) => "Check the file for broken quoting",
            DeliveryError::ConfigParseError { .. } => "Fix the TOML syntax in the config file",
            DeliveryError::InvalidConfigValueError { .. } => {
                "Correct the setting in the config file or on the command line"
            }
            DeliveryError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeliveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message_names_field() {
        let err = DeliveryError::InvalidConfigValueError {
            field: "filter.window_minutes".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 1440".to_string(),
        };

        assert!(err.to_string().contains("filter.window_minutes"));
        assert!(err.user_friendly_message().contains("'0'"));
        assert!(err.recovery_suggestion().contains("command line"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DeliveryError = io.into();
        assert!(matches!(err, DeliveryError::IoError(_)));
    }
}
