use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Compact stdout logging for local runs and the server binary.
/// `RUST_LOG` wins when set; the fallback keeps request logs visible.
pub fn init_logging_default() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// JSON logs for container deployments; same stdout writer.
pub fn init_logging_json() {
    // 默认 info；可通过 RUST_LOG 覆盖，例如 RUST_LOG=info,service::suggest=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
