use std::env;
use std::path::PathBuf;

const DEFAULT_CHART_URL: &str = "https://www.imdb.com/chart/top/";
const DEFAULT_TARGET_COUNT: usize = 250;
const DEFAULT_OUTPUT_PATH: &str = "data/imdb_top_movies.csv";
const DEFAULT_MIN_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub chart_url: String,
    pub target_count: usize,
    pub output_path: PathBuf,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Config {
    /// Every variable is optional; a bare run uses the fixed defaults.
    pub fn from_env() -> Self {
        Self {
            chart_url: env::var("IMDB_CHART_URL")
                .unwrap_or_else(|_| DEFAULT_CHART_URL.to_string()),
            target_count: parsed_var("TARGET_COUNT", DEFAULT_TARGET_COUNT),
            output_path: env::var("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            min_delay_ms: parsed_var("MIN_DELAY_MS", DEFAULT_MIN_DELAY_MS),
            max_delay_ms: parsed_var("MAX_DELAY_MS", DEFAULT_MAX_DELAY_MS),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
