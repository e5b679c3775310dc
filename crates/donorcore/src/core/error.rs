use thiserror::Error;

use super::config::ConfigError;
use crate::storage::StoreError;

/// Centralized error types for the application
///
/// Uses `thiserror` for automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use donorcore::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid settings
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Donor store failures (connection, query, worker thread)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Telegram API errors
    #[cfg(feature = "telegram")]
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
