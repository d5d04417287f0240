use crate::core::schema::ValidationReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{value} is already in the list")]
    DuplicateEntry { value: String },

    #[error("Row {index} does not exist (list has {len} rows)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Score {score} is outside 0..=100")]
    ScoreOutOfRange { score: i32 },

    #[error("Invalid command: {message}")]
    CommandError { message: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    System,
    Configuration,
    Edit,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::IoError(_) | FormError::SerializationError(_) => ErrorCategory::System,
            FormError::ConfigValidationError { .. }
            | FormError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FormError::DuplicateEntry { .. }
            | FormError::IndexOutOfBounds { .. }
            | FormError::ScoreOutOfRange { .. }
            | FormError::CommandError { .. } => ErrorCategory::Edit,
            FormError::Validation(_) => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 編輯錯誤不影響狀態，使用者可直接重試
            ErrorCategory::Edit => ErrorSeverity::Low,
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormError::IoError(_) => "Check that the file exists and is readable",
            FormError::SerializationError(_) => "Check that the response file is valid JSON",
            FormError::ConfigValidationError { .. }
            | FormError::InvalidConfigValueError { .. } => "Fix the survey configuration and try again",
            FormError::DuplicateEntry { .. } => "Pick a value that is not already selected (see `choices`)",
            FormError::IndexOutOfBounds { .. } => "Use `show` to list the current rows",
            FormError::ScoreOutOfRange { .. } => "Scores must be whole numbers from 0 to 100",
            FormError::CommandError { .. } => "Type `help` for the list of commands",
            FormError::Validation(_) => "Correct the highlighted fields and submit again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::Validation(report) => {
                format!("The form has {} problem(s):\n{}", report.len(), report)
            }
            FormError::IoError(e) => format!("Could not read the file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
