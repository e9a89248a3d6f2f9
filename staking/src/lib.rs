pub use background;
pub use config;
pub use errors;
pub use intl;
pub use network;
pub use proto;
pub use rpc;
pub use token;

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` wins over `filter`;
/// calling it again once a subscriber is installed is a no-op.
pub fn init_logging(filter: &str) -> Result<(), String> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => EnvFilter::try_new(filter).map_err(|e| e.to_string())?,
    };

    // fails only when a subscriber already exists
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::info!(target: "staking", "staking core initialized");

    Ok(())
}

#[cfg(test)]
mod tests_init {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        assert!(init_logging("rpc=debug,refresh=info").is_ok());
        assert!(init_logging("info").is_ok());
    }

    #[test]
    fn test_invalid_filter() {
        if std::env::var("RUST_LOG").is_err() {
            assert!(init_logging("rpc=loud").is_err());
        }
    }
}
