use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Target file is not valid UTF-8: {0}")]
    DecodeError(#[from] std::string::FromUtf8Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Decode,
    Config,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatchError::IoError(_) => ErrorCategory::Io,
            PatchError::DecodeError(_) => ErrorCategory::Decode,
            PatchError::ConfigError { .. }
            | PatchError::InvalidConfigValueError { .. }
            | PatchError::MissingConfigError { .. } => ErrorCategory::Config,
            PatchError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PatchError::IoError(_) => ErrorSeverity::High,
            PatchError::DecodeError(_) => ErrorSeverity::Medium,
            PatchError::ConfigError { .. }
            | PatchError::InvalidConfigValueError { .. }
            | PatchError::MissingConfigError { .. } => ErrorSeverity::Medium,
            PatchError::ProcessingError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PatchError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the target file exists and the project root is correct".to_string()
            }
            PatchError::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                "Check file permissions on the target path".to_string()
            }
            PatchError::IoError(_) => "Check the target path and filesystem state".to_string(),
            PatchError::DecodeError(_) => {
                "The target must be a UTF-8 text file; binary files cannot be patched".to_string()
            }
            PatchError::ConfigError { .. } => {
                "Check the job file for TOML syntax errors".to_string()
            }
            PatchError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            PatchError::MissingConfigError { field } => {
                format!("Add the required field '{}' to the configuration", field)
            }
            PatchError::ProcessingError { .. } => {
                "Inspect the target file content and the configured search text".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PatchError::IoError(e) => format!("Could not access the target file: {}", e),
            PatchError::DecodeError(_) => {
                "The target file is not valid UTF-8 text".to_string()
            }
            PatchError::ConfigError { message } => format!("Configuration problem: {}", message),
            PatchError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid value '{}' for {}: {}", value, field, reason),
            PatchError::MissingConfigError { field } => {
                format!("Configuration is missing the '{}' field", field)
            }
            PatchError::ProcessingError { message } => {
                format!("Patch processing failed: {}", message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
