//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Install the global subscriber
///
/// `RUST_LOG` wins over the environment's default filter. Production logs
/// are emitted as JSON lines, everything else in the human-readable format.
pub fn init_tracing(env: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env.default_log_filter()));

    match env {
        Environment::Prod => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        Environment::Local | Environment::Dev => {
            tracing_subscriber::fmt().with_env_filter(filter).init()
        }
    }
}
