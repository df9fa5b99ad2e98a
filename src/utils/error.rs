use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown car id: {id}")]
    UnknownCarError { id: String },

    #[error("Duplicate car id: {id}")]
    DuplicateCarError { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Scenario,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CarError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CarError::IoError(_) => ErrorCategory::Io,
            CarError::SerializationError(_) => ErrorCategory::Serialization,
            CarError::TomlError(_)
            | CarError::ConfigValidationError { .. }
            | CarError::InvalidConfigValueError { .. }
            | CarError::MissingConfigError { .. } => ErrorCategory::Config,
            CarError::UnknownCarError { .. } | CarError::DuplicateCarError { .. } => {
                ErrorCategory::Scenario
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // stdout 被關閉之類的情況，重跑通常就好
            CarError::IoError(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                ErrorSeverity::Medium
            }
            CarError::IoError(_) => ErrorSeverity::Critical,
            CarError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CarError::IoError(_) => {
                "Check that the scenario file exists and is readable".to_string()
            }
            CarError::SerializationError(_) => {
                "Report this as a bug; car state should always serialize".to_string()
            }
            CarError::TomlError(_) => "Make sure the scenario file is valid TOML".to_string(),
            CarError::ConfigValidationError { field, .. }
            | CarError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the scenario file", field)
            }
            CarError::MissingConfigError { field } => {
                format!("Add '{}' to the scenario file", field)
            }
            CarError::UnknownCarError { id } => {
                format!("Declare a [[cars]] entry with id = \"{}\"", id)
            }
            CarError::DuplicateCarError { id } => {
                format!("Give each car a unique id; '{}' is used more than once", id)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Config => format!("The scenario configuration is invalid: {}", self),
            ErrorCategory::Scenario => format!("The scenario cannot be replayed: {}", self),
            ErrorCategory::Serialization => format!("Could not render the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CarError>;
