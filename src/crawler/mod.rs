use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use reqwest::Client;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use crate::config::Config;
use crate::crawler::models::Movie;
use crate::error::Result;

mod fetcher;
mod parser;
pub mod models;
pub mod service;

/// Fetch the chart page and extract its movie list.
///
/// A fetch failure is fatal to the run; a missing or malformed payload is
/// reported as a typed error so the caller can degrade it to an empty list.
pub async fn crawl_chart(cfg: &Config) -> Result<Vec<Movie>> {
    let client = fetcher::build_client();

    let html = fetcher::fetch_chart_html(&client, &cfg.chart_url).await?;
    parser::extract_movies(&html)
}

/// Second pass: fetch each movie's detail page and fill in the director.
///
/// Consumes the chart list and returns a new one of equal length and order.
/// Every failure mode degrades only that record's director to None.
pub async fn enrich_with_directors(cfg: &Config, movies: Vec<Movie>) -> Vec<Movie> {
    let client = fetcher::build_client();

    let bar = ProgressBar::new(movies.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    bar.set_message("Fetching directors");

    let mut enriched = Vec::with_capacity(movies.len());

    for movie in movies {
        let director = match movie.url.as_deref() {
            Some(url) => {
                debug!(url, "Fetching detail page");

                let director = match fetch_director(&client, url).await {
                    Ok(Some(name)) => Some(name),
                    Ok(None) => {
                        debug!(url, "No director found on detail page");
                        None
                    }
                    Err(e) => {
                        warn!(url, error = %e, "Failed to fetch detail page");
                        None
                    }
                };

                // polite delay
                let delay = rand::rng().random_range(cfg.min_delay_ms..=cfg.max_delay_ms);
                sleep(Duration::from_millis(delay)).await;

                director
            }
            None => None,
        };

        enriched.push(Movie { director, ..movie });
        bar.inc(1);
    }

    bar.finish_with_message("Directors fetched");
    enriched
}

/// Fetch one detail page and run the director heuristic over it.
///
/// Ok(None) means the page came back but the heuristic missed; Err means
/// the fetch itself failed.
pub async fn fetch_director(client: &Client, url: &str) -> Result<Option<String>> {
    let html = fetcher::fetch_detail_html(client, url).await?;
    Ok(parser::parse_director(&html))
}
