//! Environment-driven configuration.

use std::path::PathBuf;

const DEFAULT_LEDGER_PATH: &str = "bookings.csv";
const DEFAULT_LOG_FILTER: &str = "cineease=info";

/// Runtime configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Where confirmed bookings are appended
    pub ledger_path: PathBuf,
    /// Log filter, in `tracing_subscriber::EnvFilter` syntax
    pub log_filter: String,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults:
    /// `LEDGER_PATH` (default `bookings.csv`) and `RUST_LOG`
    /// (default `cineease=info`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let ledger_path = lookup("LEDGER_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH), PathBuf::from);
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            ledger_path,
            log_filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.ledger_path, PathBuf::from("bookings.csv"));
        assert_eq!(config.log_filter, "cineease=info");
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config::from_lookup(|name| match name {
            "LEDGER_PATH" => Some("/var/lib/cineease/bookings.csv".to_string()),
            "RUST_LOG" => Some("cineease=debug".to_string()),
            _ => None,
        });
        assert_eq!(
            config.ledger_path,
            PathBuf::from("/var/lib/cineease/bookings.csv")
        );
        assert_eq!(config.log_filter, "cineease=debug");
    }
}
