//! # Pooled HTTP Server - Entry Point
//! src/main.rs
//!
//! Lee la configuración, inicializa el logging y arranca el servidor.
//! Cualquier error antes de aceptar conexiones termina el proceso con
//! código 1.

use pooled_http_server::config::Config;
use pooled_http_server::error::ServerError;
use pooled_http_server::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::new();

    // RUST_LOG tiene prioridad sobre --log-level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_target(false)
        .init();

    info!(
        address = %config.address(),
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        recv_buffer = config.recv_buffer,
        cache_file = %config.cache_file.display(),
        strict_cache = config.strict_cache,
        "Starting pooled_http_server"
    );

    if let Err(e) = run(config) {
        error!(error = %e, "Fatal startup error");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), ServerError> {
    let server = Server::from_config(config)?;
    server.run()
}
