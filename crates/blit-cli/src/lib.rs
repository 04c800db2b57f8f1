//! `blit` command-line library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (search, validate, fmt, show, rop, pattern)

pub mod cli;
pub mod commands;

pub use cli::{parse_byte, Cli, Commands};
pub use commands::{
    handle_fmt, handle_pattern, handle_rop, handle_search, handle_show, handle_validate,
    init_logging, load_settings,
};
