mod cli;
mod console;

use crate::cli::{Mode, CLI};
use crate::console::Console;
use clap::Parser;
use snip_cache::{JsonFileStore, UrlCache};
use snip_client::{ClientConfig, ReqwestTransport, TinyUrlClient};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CLI::parse();
    let store = JsonFileStore::new(&config.cache_dir, &config.cache_file);

    info!(
        cache = %store.path().display(),
        base_url = %config.base_url,
        "starting snip"
    );

    let cache = UrlCache::open(store);
    let client = TinyUrlClient::new(
        ClientConfig::builder()
            .base_url(config.base_url.clone())
            .build(),
        ReqwestTransport::new()?,
    )?;
    let mut console = Console::new(cache, client, std::io::stdout());

    match config.mode() {
        Mode::Shorten(url) => console.shorten(&url).await?,
        Mode::Top(limit) => console.top(limit)?,
        Mode::Interactive => {
            console
                .interactive(BufReader::new(tokio::io::stdin()))
                .await?
        }
    }

    Ok(())
}
