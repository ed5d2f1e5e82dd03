//! Startup error types

use thiserror::Error;

/// Errors surfaced while bringing the service up. Configuration loading and
/// bind-address resolution happen before any request handling exists, so
/// these never cross the HTTP edge.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),
}
