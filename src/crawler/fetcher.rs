use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;

use crate::error::{Result, ScrapeError};

// The chart site varies its markup by client signature, so both fetches
// identify as a desktop browser with an English language preference.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

pub fn build_client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .expect("failed to build http client")
}

/// Fetch the chart page. A non-2xx status is a fetch failure here.
pub async fn fetch_chart_html(client: &Client, url: &str) -> Result<String> {
    let res = client
        .get(url)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| ScrapeError::fetch(url, e))?;

    res.text().await.map_err(|e| ScrapeError::fetch(url, e))
}

/// Fetch a detail page. Whatever body comes back is handed to the parser,
/// so only transport errors count as failures.
pub async fn fetch_detail_html(client: &Client, url: &str) -> Result<String> {
    let res = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::fetch(url, e))?;

    res.text().await.map_err(|e| ScrapeError::fetch(url, e))
}
