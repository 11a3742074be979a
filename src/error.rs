use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("page carries no structured data payload")]
    MissingPayload,

    #[error("structured data payload is not valid JSON")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("failed to write output file")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output rows")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn fetch(url: &str, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }

    /// Output-side failures abort the process instead of degrading to an
    /// empty result.
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Csv(_))
    }
}
