//! CLI argument parsing for the `blit` tool.
//!
//! CLI flags override every other config source.

use clap::{Parser, Subcommand};

/// Blit
///
/// Query and maintain the documentation search data of the blit raster
/// library, and try out its binary raster operations.
#[derive(Parser, Debug)]
#[command(name = "blit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/blit/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Tool commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the index the way the documentation search box does
    Search {
        /// Search query
        query: String,

        /// Search data file or directory (default from config)
        #[arg(long)]
        index: Option<String>,

        /// Match anywhere in the term instead of at its start
        #[arg(long)]
        substring: bool,

        /// Maximum results to return (default from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check search data invariants; fails when errors are found
    Validate {
        /// Search data file or directory (default from config)
        #[arg(long)]
        index: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-serialize search data
    Fmt {
        /// Search data file or directory (default from config)
        #[arg(long)]
        index: Option<String>,

        /// Fail unless every file already round-trips byte for byte
        #[arg(long)]
        check: bool,

        /// Print the entries as JSON instead
        #[arg(long, conflicts_with = "check")]
        json: bool,
    },

    /// Show one entry by its exact key
    Show {
        /// Entry key, for example rop2_2eh_10
        key: String,

        /// Search data file or directory (default from config)
        #[arg(long)]
        index: Option<String>,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a raster operation by reverse polish name or alias
    Rop {
        /// Operation name, for example DSx or xor
        #[arg(required_unless_present = "table")]
        name: Option<String>,

        /// Source byte (decimal, 0x.. or 0b..)
        #[arg(short, long, value_parser = parse_byte)]
        source: Option<u8>,

        /// Destination byte (decimal, 0x.. or 0b..)
        #[arg(short, long, value_parser = parse_byte)]
        destination: Option<u8>,

        /// List all sixteen operations with their truth tables
        #[arg(long)]
        table: bool,
    },

    /// Tile a checkerboard with the copy operation and print it
    Pattern {
        /// Width in pixels
        #[arg(long, default_value_t = 16)]
        width: usize,

        /// Height in pixels
        #[arg(long, default_value_t = 8)]
        height: usize,
    },
}

/// Parse a byte given in decimal, hex (`0x`) or binary (`0b`).
pub fn parse_byte(text: &str) -> Result<u8, String> {
    let text = text.trim();
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u8::from_str_radix(bin, 2)
    } else {
        text.parse::<u8>()
    };
    parsed.map_err(|e| format!("invalid byte '{text}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_search() {
        let cli = Cli::parse_from(["blit", "search", "rop", "--substring", "-n", "5"]);
        match cli.command {
            Commands::Search {
                query,
                substring,
                limit,
                json,
                index,
            } => {
                assert_eq!(query, "rop");
                assert!(substring);
                assert_eq!(limit, Some(5));
                assert!(!json);
                assert_eq!(index, None);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_with_index() {
        let cli = Cli::parse_from(["blit", "search", "d", "--index", "/docs/search"]);
        match cli.command {
            Commands::Search { index, .. } => assert_eq!(index, Some("/docs/search".to_string())),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["blit", "--config", "/path/to/config.toml", "validate"]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
        assert!(matches!(cli.command, Commands::Validate { .. }));
    }

    #[test]
    fn test_cli_with_log_level_after_subcommand() {
        let cli = Cli::parse_from(["blit", "validate", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_fmt_check() {
        let cli = Cli::parse_from(["blit", "fmt", "--check"]);
        match cli.command {
            Commands::Fmt { check, json, .. } => {
                assert!(check);
                assert!(!json);
            }
            _ => panic!("Expected Fmt command"),
        }
    }

    #[test]
    fn test_cli_fmt_check_conflicts_with_json() {
        assert!(Cli::try_parse_from(["blit", "fmt", "--check", "--json"]).is_err());
    }

    #[test]
    fn test_cli_show() {
        let cli = Cli::parse_from(["blit", "show", "rop2_2eh_10"]);
        match cli.command {
            Commands::Show { key, .. } => assert_eq!(key, "rop2_2eh_10"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_rop_with_operands() {
        let cli = Cli::parse_from(["blit", "rop", "DSx", "-s", "0xf0", "-d", "0b11001100"]);
        match cli.command {
            Commands::Rop {
                name,
                source,
                destination,
                table,
            } => {
                assert_eq!(name, Some("DSx".to_string()));
                assert_eq!(source, Some(0xf0));
                assert_eq!(destination, Some(0xcc));
                assert!(!table);
            }
            _ => panic!("Expected Rop command"),
        }
    }

    #[test]
    fn test_cli_rop_needs_name_or_table() {
        assert!(Cli::try_parse_from(["blit", "rop"]).is_err());
        let cli = Cli::parse_from(["blit", "rop", "--table"]);
        assert!(matches!(cli.command, Commands::Rop { table: true, name: None, .. }));
    }

    #[test]
    fn test_cli_pattern_defaults() {
        let cli = Cli::parse_from(["blit", "pattern"]);
        match cli.command {
            Commands::Pattern { width, height } => {
                assert_eq!(width, 16);
                assert_eq!(height, 8);
            }
            _ => panic!("Expected Pattern command"),
        }
    }

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("255"), Ok(255));
        assert_eq!(parse_byte("0xA5"), Ok(0xa5));
        assert_eq!(parse_byte("0b1010"), Ok(10));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xzz").is_err());
    }
}
