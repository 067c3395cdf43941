use crate::utils::error::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

/// 操作完成後顯示的短暫通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// Logs the outcome of a user action and turns it into a notice.
    /// Failures are never retried.
    pub fn surface<T>(
        action: &str,
        result: &Result<T>,
        success: impl FnOnce(&T) -> String,
    ) -> Self {
        match result {
            Ok(value) => {
                let message = success(value);
                tracing::info!("✅ {}: {}", action, message);
                Self::success(message)
            }
            Err(e) => {
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                    action,
                    e,
                    e.category(),
                    e.severity()
                );
                Self::error(e.user_friendly_message())
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == ToastLevel::Error
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            ToastLevel::Success => "✅",
            ToastLevel::Info => "ℹ️",
            ToastLevel::Error => "❌",
        };
        write!(f, "{} {}", icon, self.message)
    }
}
