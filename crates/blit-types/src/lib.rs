//! # blit-types
//!
//! Shared types for the blit workspace.
//!
//! - Settings: layered configuration (defaults, config file, env, CLI)
//! - BlitError: error type for settings
//!
//! ## Usage
//!
//! ```rust
//! use blit_types::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.search.limit, 50);
//! ```

pub mod config;
pub mod error;

pub use config::{MatchModeSetting, SearchSettings, Settings};
pub use error::BlitError;
