//! Error types shared by the blit tools.

use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum BlitError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
