use crate::model::ConfigError;
use chrono::{FixedOffset, Offset, Utc};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_FONT_PATH: &str = "assets/DejaVuSans-Bold.ttf";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
const DEFAULT_OUTPUT_DIR: &str = "output";

/// OAuth 1.0a user-context secrets for the posting API.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(var))
        };

        Ok(Self {
            api_key: required("TWITTER_API_KEY")?,
            api_secret: required("TWITTER_API_SECRET")?,
            access_token: required("TWITTER_ACCESS_TOKEN")?,
            access_token_secret: required("TWITTER_ACCESS_TOKEN_SECRET")?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub font_path: PathBuf,
    pub bind_addr: String,
    pub fetch_timeout: Duration,
    /// Offset applied to the clock when dating a report.
    pub utc_offset: FixedOffset,
    pub watermark_handle: Option<String>,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                .unwrap_or_else(|| Utc.fix()),
            watermark_handle: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(path) = get("BOT_FONT_PATH") {
            config.font_path = PathBuf::from(path);
        }
        if let Some(addr) = get("BOT_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(raw) = get("BOT_FETCH_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid {
                    var: "BOT_FETCH_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get("BOT_UTC_OFFSET_MINUTES") {
            config.utc_offset = raw
                .parse::<i32>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .and_then(FixedOffset::east_opt)
                .ok_or(ConfigError::Invalid {
                    var: "BOT_UTC_OFFSET_MINUTES",
                    value: raw.clone(),
                })?;
        }
        config.watermark_handle = get("BOT_WATERMARK_HANDLE");
        if let Some(dir) = get("BOT_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }
}

/// Reads settings from the environment, after seeding it from `.env` when present.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    AppConfig::from_env()
}
