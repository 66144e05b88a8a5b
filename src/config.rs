//! Command-line configuration and logging setup for the `stable-match` binary.
//!
//! ## Flags
//!
//! | Flag | Default | Meaning |
//! |------|---------|---------|
//! | `-n, --size` | 5 | agents per side for a random table |
//! | `-s, --seed` | 42 | seed for the random table |
//! | `--demo` | off | use the built-in named roster instead |
//! | `--show-preferences` | off | print both preference tables |
//! | `--trace` | off | print every proposal |
//! | `-l, --log-level` | info | tracing filter when `RUST_LOG` is unset |

use clap::Parser;

/// Stable matching command line
#[derive(Parser, Debug, Clone)]
#[command(name = "stable-match")]
#[command(version)]
#[command(
    about = "Gale-Shapley stable matching over random or demo preferences",
    long_about = None
)]
pub struct CliConfig {
    /// Number of proposers (and receivers) in the random table
    #[arg(short = 'n', long, default_value_t = 5)]
    pub size: usize,

    /// Seed for the random preference table
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Run the built-in five-by-five named roster
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Print both preference tables before matching
    #[arg(long, default_value_t = false)]
    pub show_preferences: bool,

    /// Print every proposal as it is made
    #[arg(long, default_value_t = false)]
    pub trace: bool,

    /// Log level
    #[arg(
        short = 'l',
        long,
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["stable-match"]);

        assert_eq!(config.size, 5);
        assert_eq!(config.seed, 42);
        assert!(!config.demo);
        assert!(!config.trace);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "stable-match",
            "-n",
            "1000",
            "--seed",
            "7",
            "--show-preferences",
            "-l",
            "debug",
        ]);

        assert_eq!(config.size, 1000);
        assert_eq!(config.seed, 7);
        assert!(config.show_preferences);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_level() {
        let result = CliConfig::try_parse_from(["stable-match", "-l", "loud"]);
        assert!(result.is_err());
    }
}
