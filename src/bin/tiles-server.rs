//! The tiles HTTP splitting service.
//!
//! Reads its shared secret and listen address from the environment, builds
//! a [`TextTiler`] with the standard parameters, and serves until Ctrl-C
//! or SIGTERM.

use tiles::server::{ServerConfig, serve};
use tiles::{TextTiler, TilingConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            std::process::exit(1);
        }
    };

    let tiler = TextTiler::new(TilingConfig::default());

    if let Err(error) = serve(config, tiler).await {
        tracing::error!(%error, "server exited with error");
        std::process::exit(1);
    }
}
