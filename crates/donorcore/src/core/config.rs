use lazy_regex::regex_is_match;
use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Read before `Settings` because the logger starts first
/// Default: donorbot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "donorbot.log".to_string()));

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "donors.sqlite";

/// Default table holding donor records
pub const DEFAULT_DONOR_TABLE: &str = "donors";

/// `DATABASE_PATH` value that selects the in-memory store
pub const MEMORY_DATABASE: &str = ":memory:";

/// Default port for the webhook listener
pub const DEFAULT_WEBHOOK_PORT: u16 = 8080;

/// Default interval between idle session sweeps (in seconds)
pub const DEFAULT_SESSION_PRUNE_SECS: u64 = 300;

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum number of retries for dispatcher reconnection
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher retry attempts (in seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Dispatcher retry delay duration
    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }

    /// Base for exponential backoff calculation
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;
}

/// Telegram limits
pub mod telegram {
    /// Maximum length of a single text message
    pub const MAX_MESSAGE_LEN: usize = 4096;

    /// Buttons per row in the blood group selector
    pub const BUTTONS_PER_ROW: usize = 2;
}

/// Configuration errors. Always fatal at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required setting {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where donor records are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: String, table: String },
    Memory,
}

/// Webhook listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    pub url: String,
    pub port: u16,
}

/// Process settings, read once at startup.
#[derive(Debug)]
pub struct Settings {
    pub bot_token: SecretString,
    pub store: StoreBackend,
    pub webhook: Option<WebhookSettings>,
    pub session_prune_interval: Duration,
    /// Alternative Bot API server, e.g. a local `telegram-bot-api`
    pub bot_api_url: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// Call after `dotenvy::dotenv()` so values from `.env` are visible.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    /// * `ConfigError::Missing` - the bot token is absent
    /// * `ConfigError::Invalid` - a value is present but unusable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let path = get("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        let store = if path == MEMORY_DATABASE {
            StoreBackend::Memory
        } else {
            let table = get("DONOR_TABLE").unwrap_or_else(|| DEFAULT_DONOR_TABLE.to_string());
            validate_table_name(&table)?;
            StoreBackend::Sqlite { path, table }
        };

        let webhook = match get("WEBHOOK_URL") {
            Some(url) => {
                let port = match get("WEBHOOK_PORT") {
                    Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                        key: "WEBHOOK_PORT",
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_WEBHOOK_PORT,
                };
                Some(WebhookSettings { url, port })
            }
            None => None,
        };

        let prune_secs = match get("SESSION_PRUNE_INTERVAL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_PRUNE_INTERVAL_SECS",
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_PRUNE_INTERVAL_SECS",
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_SESSION_PRUNE_SECS,
        };

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            store,
            webhook,
            session_prune_interval: Duration::from_secs(prune_secs),
            bot_api_url: get("BOT_API_URL"),
        })
    }
}

/// Table names are spliced into SQL, so only plain identifiers are allowed.
pub fn validate_table_name(table: &str) -> Result<(), ConfigError> {
    if regex_is_match!(r"^[A-Za-z_][A-Za-z0-9_]*$", table) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: "DONOR_TABLE",
            reason: format!("'{}' is not a plain SQL identifier", table),
        })
    }
}
