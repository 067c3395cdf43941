pub mod error;
pub mod format;
pub mod logger;
pub mod toast;
pub mod validation;
