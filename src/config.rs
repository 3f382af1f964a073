// =============================================================================
// Bot Configuration — JSON file with per-field defaults, secrets from env
// =============================================================================
//
// Every field carries `#[serde(default)]` so that an empty or partial config
// file still loads. Credentials never live in the file: they are read from
// the environment (optionally via `.env`) when the application state is built.
// =============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::Locale;

pub const ENV_CHANNEL_ACCESS_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const ENV_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";
pub const ENV_ADMIN_TOKEN: &str = "TWSE_BOT_ADMIN_TOKEN";
pub const ENV_BIND_ADDR: &str = "TWSE_BOT_BIND_ADDR";
pub const ENV_CONFIG_PATH: &str = "TWSE_BOT_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "bot_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_twse_base_url() -> String {
    "https://www.twse.com.tw".to_string()
}

fn default_line_api_base_url() -> String {
    "https://api.line.me".to_string()
}

fn default_history_months() -> u32 {
    3
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_locale() -> Locale {
    Locale::ZhTw
}

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("星宇航空", "2646"),
        ("長榮航", "2618"),
        ("台積電", "2330"),
        ("鴻海", "2317"),
        ("聯發科", "2454"),
    ]
    .into_iter()
    .map(|(name, code)| (name.to_string(), code.to_string()))
    .collect()
}

// =============================================================================
// BotConfig
// =============================================================================

/// Top-level configuration for the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the TWSE website (no trailing slash).
    #[serde(default = "default_twse_base_url")]
    pub twse_base_url: String,

    /// Base URL of the LINE Messaging API (no trailing slash).
    #[serde(default = "default_line_api_base_url")]
    pub line_api_base_url: String,

    /// How many calendar months the history fetch may walk back to collect
    /// enough sessions.
    #[serde(default = "default_history_months")]
    pub history_months: u32,

    /// Timeout applied to every outbound HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Language of replies sent to chat users.
    #[serde(default = "default_locale")]
    pub locale: Locale,

    /// Human-readable name -> stock code.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            twse_base_url: default_twse_base_url(),
            line_api_base_url: default_line_api_base_url(),
            history_months: default_history_months(),
            request_timeout_secs: default_request_timeout_secs(),
            locale: default_locale(),
            aliases: default_aliases(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read bot config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse bot config from {}", path.display()))?;

        info!(
            path = %path.display(),
            aliases = config.aliases.len(),
            locale = %config.locale,
            "bot config loaded"
        );

        Ok(config)
    }

    /// Apply environment overrides that are allowed to beat the file.
    pub fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var(ENV_BIND_ADDR) {
            let addr = addr.trim();
            if !addr.is_empty() {
                self.bind_addr = addr.to_string();
            }
        }
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Secrets read from the environment. Unset variables become empty strings;
/// consumers treat empty as "not configured". Holds secrets, so no `Debug`.
#[derive(Clone, Default)]
pub struct Credentials {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub admin_token: String,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            channel_secret: std::env::var(ENV_CHANNEL_SECRET).unwrap_or_default(),
            channel_access_token: std::env::var(ENV_CHANNEL_ACCESS_TOKEN).unwrap_or_default(),
            admin_token: std::env::var(ENV_ADMIN_TOKEN).unwrap_or_default(),
        }
    }

    /// Names of the variables that are missing, for a startup warning.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (ENV_CHANNEL_SECRET, &self.channel_secret),
            (ENV_CHANNEL_ACCESS_TOKEN, &self.channel_access_token),
            (ENV_ADMIN_TOKEN, &self.admin_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}
