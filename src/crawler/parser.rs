use scraper::{Html, Selector};
use serde::Deserialize;

use crate::crawler::models::Movie;
use crate::error::{Result, ScrapeError};

// Shape of the chart page's ld+json payload. Every level is optional:
// a hole anywhere degrades that field to None, never the whole item.
#[derive(Debug, Deserialize)]
struct ChartPayload {
    #[serde(default, rename = "itemListElement")]
    item_list_element: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    item: Option<ChartItem>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartItem {
    name: Option<String>,
    #[serde(rename = "aggregateRating")]
    aggregate_rating: Option<AggregateRating>,
    genre: Option<GenreField>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue")]
    rating_value: Option<f64>,
}

// The payload emits genre either as one comma-delimited string or as a
// list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenreField {
    One(String),
    Many(Vec<String>),
}

impl GenreField {
    fn into_genres(self) -> Vec<String> {
        let raw = match self {
            GenreField::One(s) => s.split(',').map(str::to_string).collect(),
            GenreField::Many(list) => list,
        };
        raw.iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// Extract one movie per chart entry from the page's embedded ld+json
/// payload, in payload order.
///
/// The rendered chart only carries the first 25 entries; the ld+json
/// payload has the full list.
pub fn extract_movies(html: &str) -> Result<Vec<Movie>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    let payload = document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or(ScrapeError::MissingPayload)?;

    let chart: ChartPayload =
        serde_json::from_str(&payload).map_err(ScrapeError::MalformedPayload)?;

    let movies = chart
        .item_list_element
        .into_iter()
        .map(|entry| {
            let item = entry.item.unwrap_or_default();
            Movie {
                title: item.name,
                rating: item.aggregate_rating.and_then(|r| r.rating_value),
                genres: item
                    .genre
                    .map(GenreField::into_genres)
                    .unwrap_or_default(),
                description: item.description,
                // never present in the chart payload; filled in by the
                // detail-page pass
                director: None,
                url: item.url,
            }
        })
        .collect();

    Ok(movies)
}

/// Pull the director's name out of a detail page.
///
/// Positional heuristic: take the cast section's first metadata row and,
/// if it mentions "Director", the first content anchor inside it. Any miss
/// along the way is a None, not an error.
pub fn parse_director(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let row_selector =
        Selector::parse(r#"section[data-testid="title-cast"] .ipc-metadata-list__item"#)
            .unwrap();
    let row = document.select(&row_selector).next()?;

    let row_text: String = row.text().collect();
    if !row_text.contains("Director") {
        return None;
    }

    let link_selector =
        Selector::parse(r#"a[class*="ipc-metadata-list-item__list-content-item"]"#).unwrap();
    let name = row
        .select(&link_selector)
        .next()
        .map(|a| a.text().collect::<String>().trim().to_string())?;

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
