use std::fs;
use std::path::{Path, PathBuf};

use crate::crawler::models::Movie;
use crate::error::Result;

const HEADER: [&str; 6] = ["title", "rating", "genres", "description", "director", "url"];

pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all records as UTF-8 CSV, one row per movie in order. Absent
    /// fields render as empty cells. Returns the number of rows written.
    pub fn save_movies(&self, movies: &[Movie]) -> Result<usize> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADER)?;

        for movie in movies {
            let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
            let genres = movie.genres_joined();

            writer.write_record([
                movie.title.as_deref().unwrap_or(""),
                rating.as_str(),
                genres.as_str(),
                movie.description.as_deref().unwrap_or(""),
                movie.director.as_deref().unwrap_or(""),
                movie.url.as_deref().unwrap_or(""),
            ])?;
        }

        writer.flush()?;
        Ok(movies.len())
    }
}
