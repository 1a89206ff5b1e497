//! Log output for the binaries.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::env::SHOPIFY_PROXY_LOG;

/// Installs a stderr log subscriber filtered by `SHOPIFY_PROXY_LOG`.
///
/// The filter uses `RUST_LOG` syntax and defaults to `info`. Standard output
/// stays reserved for query results. Calling this more than once is a no-op.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var(SHOPIFY_PROXY_LOG)
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
