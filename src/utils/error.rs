use crate::utils::validation::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeerPayError {
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Backend returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Form has {} invalid field(s): {}", .errors.len(), join_field_errors(.errors))]
    FormValidation { errors: Vec<FieldError> },

    #[error("No signed-in user")]
    NoSession,
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Authentication,
    Configuration,
    Validation,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PeerPayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PeerPayError::RequestError(_) => ErrorCategory::Network,
            PeerPayError::ApiError { .. } | PeerPayError::NotFound { .. } => {
                ErrorCategory::Backend
            }
            PeerPayError::Unauthorized { .. } | PeerPayError::NoSession => {
                ErrorCategory::Authentication
            }
            PeerPayError::ConfigError { .. }
            | PeerPayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PeerPayError::InvalidAmount { .. } | PeerPayError::FormValidation { .. } => {
                ErrorCategory::Validation
            }
            PeerPayError::IoError(_) | PeerPayError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Backend | ErrorCategory::Authentication => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的簡短訊息 (toast 使用)
    pub fn user_friendly_message(&self) -> String {
        match self {
            PeerPayError::RequestError(e) if e.is_timeout() => {
                "The server took too long to respond".to_string()
            }
            PeerPayError::RequestError(_) => "Could not reach the PeerPay server".to_string(),
            PeerPayError::ApiError { message, .. } => message.clone(),
            PeerPayError::Unauthorized { .. } => "Your session is not authorized".to_string(),
            PeerPayError::NotFound { message } => format!("Not found: {}", message),
            PeerPayError::NoSession => "Please sign in first".to_string(),
            PeerPayError::FormValidation { errors } => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Please fix the highlighted fields".to_string()),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and the configured base URL",
            ErrorCategory::Backend => "Try the action again later or contact support",
            ErrorCategory::Authentication => "Sign in again to obtain a fresh token",
            ErrorCategory::Configuration => "Review the CLI flags or the TOML config file",
            ErrorCategory::Validation => "Correct the input and submit again",
            ErrorCategory::Internal => "Re-run with --verbose and report the log",
        }
    }
}

pub type Result<T> = std::result::Result<T, PeerPayError>;
