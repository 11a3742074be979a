use tracing::{info, warn};

use crate::config::Config;
use crate::crawler::{self, models::Movie};
use crate::error::{Result, ScrapeError};
use crate::storage::csv::CsvStorage;

pub struct ScrapeService {
    cfg: Config,
    storage: CsvStorage,
}

impl ScrapeService {
    pub fn new(cfg: Config) -> Self {
        let storage = CsvStorage::new(cfg.output_path.clone());
        Self { cfg, storage }
    }

    pub async fn run(&self) -> Result<Vec<Movie>> {
        info!(url = %self.cfg.chart_url, "Fetching chart page");

        let mut movies = match crawler::crawl_chart(&self.cfg).await {
            Ok(movies) => movies,
            Err(ScrapeError::MissingPayload) => {
                warn!("Chart page carries no structured data payload");
                Vec::new()
            }
            Err(e @ ScrapeError::MalformedPayload(_)) => {
                warn!(error = %e, "Chart payload could not be parsed");
                Vec::new()
            }
            // chart fetch failure aborts the run
            Err(e) => return Err(e),
        };

        movies.truncate(self.cfg.target_count);
        info!(count = movies.len(), "Found movies, fetching director information");

        let movies = crawler::enrich_with_directors(&self.cfg, movies).await;

        let saved = self.storage.save_movies(&movies)?;
        info!(
            saved,
            path = %self.cfg.output_path.display(),
            "Saved movies to CSV"
        );

        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Server, ServerGuard};
    use tempfile::TempDir;

    fn chart_body(server_url: &str, with_urls: &[bool]) -> String {
        let items: Vec<String> = with_urls
            .iter()
            .enumerate()
            .map(|(i, linked)| {
                let url = if *linked {
                    format!(r#", "url": "{server_url}/title/tt{i}/""#)
                } else {
                    String::new()
                };
                format!(
                    r#"{{"item": {{"name": "Movie {i}", "genre": "Drama, War"{url}}}}}"#
                )
            })
            .collect();
        format!(
            "<html><head><script type=\"application/ld+json\">\
             {{\"itemListElement\": [{}]}}</script></head></html>",
            items.join(", ")
        )
    }

    fn detail_body(director: &str) -> String {
        format!(
            r#"<html><body>
              <section data-testid="title-cast">
                <li class="ipc-metadata-list__item">
                  <span>Director</span>
                  <a class="ipc-metadata-list-item__list-content-item--link">{director}</a>
                </li>
              </section>
            </body></html>"#
        )
    }

    fn service_for(server: &ServerGuard, tmp: &TempDir, target_count: usize) -> ScrapeService {
        ScrapeService::new(Config {
            chart_url: format!("{}/chart/top/", server.url()),
            target_count,
            output_path: tmp.path().join("movies.csv"),
            min_delay_ms: 0,
            max_delay_ms: 0,
        })
    }

    fn output_lines(tmp: &TempDir) -> Vec<String> {
        let raw = std::fs::read_to_string(tmp.path().join("movies.csv")).unwrap();
        raw.lines().map(str::to_string).collect()
    }

    #[tokio::test]
    async fn truncates_to_target_count_and_writes_rows() {
        let mut server = Server::new_async().await;
        let tmp = TempDir::new().unwrap();

        server
            .mock("GET", "/chart/top/")
            .with_status(200)
            .with_body(chart_body(&server.url(), &[true, true, true]))
            .create_async()
            .await;
        let first = server
            .mock("GET", "/title/tt0/")
            .with_status(200)
            .with_body(detail_body("Frank Darabont"))
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/title/tt1/")
            .with_status(200)
            .with_body(detail_body("Francis Ford Coppola"))
            .expect(1)
            .create_async()
            .await;
        let third = server
            .mock("GET", "/title/tt2/")
            .expect(0)
            .create_async()
            .await;

        let movies = service_for(&server, &tmp, 2).run().await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].director.as_deref(), Some("Frank Darabont"));
        assert_eq!(movies[1].director.as_deref(), Some("Francis Ford Coppola"));

        let lines = output_lines(&tmp);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "title,rating,genres,description,director,url");
        assert!(lines[1].starts_with("Movie 0,"));
        assert!(lines[2].starts_with("Movie 1,"));
    }

    #[tokio::test]
    async fn record_without_url_is_never_enriched() {
        let mut server = Server::new_async().await;
        let tmp = TempDir::new().unwrap();

        server
            .mock("GET", "/chart/top/")
            .with_status(200)
            .with_body(chart_body(&server.url(), &[false]))
            .create_async()
            .await;

        let movies = service_for(&server, &tmp, 5).run().await.unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].director, None);

        let lines = output_lines(&tmp);
        assert_eq!(lines[1], "Movie 0,,\"Drama, War\",,,");
    }

    #[tokio::test]
    async fn chart_fetch_failure_aborts_without_output() {
        let mut server = Server::new_async().await;
        let tmp = TempDir::new().unwrap();

        server
            .mock("GET", "/chart/top/")
            .with_status(500)
            .create_async()
            .await;

        let err = service_for(&server, &tmp, 5).run().await.unwrap_err();

        assert!(matches!(err, ScrapeError::Fetch { .. }));
        assert!(!tmp.path().join("movies.csv").exists());
    }

    #[tokio::test]
    async fn missing_payload_degrades_to_header_only_output() {
        let mut server = Server::new_async().await;
        let tmp = TempDir::new().unwrap();

        server
            .mock("GET", "/chart/top/")
            .with_status(200)
            .with_body("<html><body>rendered chart only</body></html>")
            .create_async()
            .await;

        let movies = service_for(&server, &tmp, 5).run().await.unwrap();

        assert!(movies.is_empty());
        let lines = output_lines(&tmp);
        assert_eq!(lines, vec!["title,rating,genres,description,director,url"]);
    }
}
