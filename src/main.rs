mod config;
mod crawler;
mod error;
mod storage;

use config::Config;
use crawler::service::ScrapeService;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env();
    let service = ScrapeService::new(cfg);

    match service.run().await {
        Ok(movies) => {
            println!("\n==============================");
            println!("TOTAL MOVIES SCRAPED: {}", movies.len());
            println!("==============================\n");
        }
        Err(e) if e.is_output_error() => return Err(e.into()),
        Err(e) => {
            // scrape failures yield an empty result, not an exit code
            error!(error = %e, "Scrape failed, nothing written");
        }
    }

    Ok(())
}
