//! parlor-chat entry point.
//!
//! Runs the terminal chat widget against the relay at `SERVER_URL`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use parlor::client::FileNameStore;
use parlor::config::ClientConfig;
use parlor::tui::runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();

    // The terminal belongs to the UI, so logs only go to a file.
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    tracing::info!(url = %config.server_url, "starting parlor-chat");

    let store = FileNameStore::new(&config.name_file);
    tracing::debug!(path = %store.path().display(), "using name store");
    runtime::run(&config, store).await?;

    Ok(())
}
