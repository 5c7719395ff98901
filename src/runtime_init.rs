//! Startup wiring: logging, configuration, signature store, and the serve
//! loop.

use std::path::Path;
use std::sync::Arc;

use modguard::config::{Config, ConfigError};
use modguard::pipeline::ModerationPipeline;
use modguard::queue::ModerationQueue;
use modguard::signatures::SignatureStore;

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_logging(json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Load configuration from `--config` or fall back to defaults.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => Config::from_file(Path::new(p)),
        None => Ok(Config::default()),
    }
}

/// Build the signature store.
///
/// A configured signature file that fails to load leaves the store
/// unavailable rather than falling back to the built-in catalog: the
/// operator pinned a signature version, and classification fails closed
/// until that version loads.
pub fn build_signature_store(config: &Config) -> Arc<SignatureStore> {
    match &config.signature_file {
        Some(path) => match SignatureStore::from_file(path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    "signature file failed to load; classification will fail closed"
                );
                Arc::new(SignatureStore::unavailable())
            }
        },
        None => Arc::new(SignatureStore::with_builtin()),
    }
}

/// Assemble the pipeline and run the HTTP server to completion.
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let signatures = build_signature_store(&config);
    let queue = Arc::new(ModerationQueue::new(config.action_log_capacity));
    let pipeline = Arc::new(ModerationPipeline::new(signatures, queue));

    tracing::info!(
        workers = num_cpus::get(),
        bind_addr = %config.bind_addr,
        "starting moderation core"
    );
    modguard::api::start_server(pipeline, config).await?;
    Ok(())
}
