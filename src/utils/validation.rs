use crate::utils::error::{PeerPayError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 表單單一欄位的錯誤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 收集欄位錯誤，最後一次轉成 `PeerPayError::FormValidation`
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn check(&mut self, field: &str, outcome: std::result::Result<(), String>) {
        if let Err(message) = outcome {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(PeerPayError::FormValidation {
                errors: self.errors,
            })
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex"))
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PeerPayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PeerPayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PeerPayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(PeerPayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PeerPayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

// 以下為表單用的檢查，回傳給使用者看的訊息

pub fn required(label: &str, value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> std::result::Result<(), String> {
    required("Email", value)?;
    if email_pattern().is_match(value.trim()) {
        Ok(())
    } else {
        Err("Enter a valid email address".to_string())
    }
}

pub fn password(value: &str) -> std::result::Result<(), String> {
    required("Password", value)?;
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    let has_letter = value.chars().any(|c| c.is_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err("Password must contain a letter and a digit".to_string());
    }
    Ok(())
}

pub fn password_confirmation(password: &str, confirm: &str) -> std::result::Result<(), String> {
    if password != confirm {
        Err("Passwords do not match".to_string())
    } else {
        Ok(())
    }
}

pub fn phone(value: &str) -> std::result::Result<(), String> {
    let compact: String = value.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if phone_pattern().is_match(&compact) {
        Ok(())
    } else {
        Err("Enter a valid phone number".to_string())
    }
}

pub fn website(value: &str) -> std::result::Result<(), String> {
    validate_url("website", value).map_err(|_| "Enter a valid http(s) URL".to_string())
}

pub fn non_negative_amount(label: &str, value: Decimal) -> std::result::Result<(), String> {
    if value < Decimal::ZERO {
        Err(format!("{} cannot be negative", label))
    } else {
        Ok(())
    }
}

pub fn checked(value: bool, message: &str) -> std::result::Result<(), String> {
    if value {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.base_url", "https://api.peerpay.dev").is_ok());
        assert!(validate_url("api.base_url", "http://localhost:5000/api").is_ok());
        assert!(validate_url("api.base_url", "").is_err());
        assert!(validate_url("api.base_url", "invalid-url").is_err());
        assert!(validate_url("api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("poll_interval_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("poll_interval_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_email_pattern() {
        assert!(email("asha@campus.edu").is_ok());
        assert!(email("  ").is_err());
        assert!(email("asha@campus").is_err());
        assert!(email("not an email").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(password("s3cretpass").is_ok());
        assert!(password("short1").is_err());
        assert!(password("lettersonly").is_err());
        assert!(password("1234567890").is_err());
        assert!(password_confirmation("s3cretpass", "s3cretpass").is_ok());
        assert!(password_confirmation("s3cretpass", "s3cretpasS").is_err());
    }

    #[test]
    fn test_phone_pattern() {
        assert!(phone("+91 98765 43210").is_ok());
        assert!(phone("555-0100").is_err());
    }

    #[test]
    fn test_field_errors_collects_all() {
        let mut errors = FieldErrors::new();
        errors.check("email", email(""));
        errors.check("password", password("x"));
        errors.check("name", required("Name", "Asha"));

        match errors.into_result() {
            Err(PeerPayError::FormValidation { errors }) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "password"]);
            }
            other => panic!("expected form validation error, got {:?}", other),
        }
    }
}
