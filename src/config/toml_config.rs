use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PeerPayError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 30;
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub session: Option<SessionConfig>,
    pub notifications: Option<NotificationConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub poll_interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency: Option<String>,
    pub color: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"))
}

/// 未被替換的 `${VAR}` 視為沒設定
fn resolved(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty() && !env_var_pattern().is_match(v))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PeerPayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PEERPAY_TOKEN})
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn session_mut(&mut self) -> &mut SessionConfig {
        self.session.get_or_insert_with(SessionConfig::default)
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationConfig {
        self.notifications.get_or_insert_with(NotificationConfig::default)
    }

    pub fn display_mut(&mut self) -> &mut DisplayConfig {
        self.display.get_or_insert_with(DisplayConfig::default)
    }

    pub fn color_enabled(&self) -> bool {
        self.display.as_ref().and_then(|d| d.color).unwrap_or(true)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }

    fn token(&self) -> Option<&str> {
        resolved(self.session.as_ref().and_then(|s| s.token.as_ref()))
    }

    fn user_id(&self) -> Option<&str> {
        resolved(self.session.as_ref().and_then(|s| s.user_id.as_ref()))
    }

    fn poll_interval_seconds(&self) -> u64 {
        self.notifications
            .as_ref()
            .and_then(|n| n.poll_interval_seconds)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS)
    }

    fn currency(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|d| d.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        validation::validate_positive_number(
            "notifications.poll_interval_seconds",
            self.poll_interval_seconds(),
            1,
        )?;

        validation::validate_non_empty_string("display.currency", self.currency())?;

        Ok(())
    }
}
