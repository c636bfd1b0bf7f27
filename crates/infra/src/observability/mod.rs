//! Tracing subscriber setup
//!
//! The library crates only emit `tracing` events; the embedding application
//! calls [`init_tracing`] once at start-up.

use salesdesk_domain::{LoggingConfig, Result, SalesDeskError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `logging.level` when set. A second call (or a
/// subscriber installed by the host application) is reported as
/// `Ok(false)` instead of an error.
///
/// # Errors
/// Returns `SalesDeskError::Config` when `logging.level` is not a valid
/// filter directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            SalesDeskError::Config(format!("Invalid log level {:?}: {}", config.level, e))
        })?,
    };

    let installed = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()
    };

    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_is_not_an_error() {
        let config = LoggingConfig { level: "debug".into(), json: true };
        let first = init_tracing(&config).unwrap();
        let second = init_tracing(&config).unwrap();
        assert!(!second || !first);
    }

    #[test]
    fn invalid_level_is_config_error() {
        // Only meaningful when RUST_LOG does not take precedence.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig { level: "salesdesk=loud".into(), json: false };
        assert!(matches!(init_tracing(&config), Err(SalesDeskError::Config(_))));
    }
}
