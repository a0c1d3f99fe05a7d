//! OMDb lookup of movie details by title

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{MovieError, MovieResult};
use crate::models::MovieDetails;

/// Source of movie details keyed by title
pub trait MetadataFetcher {
    /// Look up a title
    ///
    /// Returns `None` when the title is unknown or the source is unreachable.
    fn fetch(&self, title: &str) -> impl Future<Output = Option<MovieDetails>> + Send;
}

/// Raw OMDb title response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    #[serde(default)]
    response: String,
    title: Option<String>,
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    poster: Option<String>,
    error: Option<String>,
}

impl OmdbResponse {
    fn into_details(self, requested_title: &str) -> MovieResult<MovieDetails> {
        if !self.response.eq_ignore_ascii_case("true") {
            let reason = self.error.unwrap_or_else(|| "Movie not found!".to_string());
            return Err(MovieError::FetchUnavailable(format!(
                "{} ({})",
                reason, requested_title
            )));
        }

        Ok(MovieDetails {
            title: self
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| requested_title.to_string()),
            year: self.year.as_deref().and_then(parse_year),
            rating: self.imdb_rating.as_deref().and_then(parse_rating),
            poster_url: self.poster.filter(|poster| is_present(poster)),
        })
    }
}

/// OMDb reports missing values as "N/A"
fn is_present(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("n/a")
}

/// First year of a release span such as "2010" or "2008–2013"
fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw
        .trim()
        .chars()
        .take(4)
        .filter(char::is_ascii_digit)
        .collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}

fn parse_rating(raw: &str) -> Option<f64> {
    if !is_present(raw) {
        return None;
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
}

/// HTTP client for the OMDb API
#[derive(Clone)]
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a client with the configured endpoint, key and timeout
    pub fn new(config: &AppConfig) -> MovieResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| MovieError::FetchUnavailable(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.omdb_base_url.clone(),
            api_key: config.omdb_api_key.clone(),
        })
    }

    /// Look up a title, reporting why nothing was found
    pub async fn lookup(&self, title: &str) -> MovieResult<MovieDetails> {
        info!("Looking up '{}' on OMDb", title);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .map_err(|e| {
                MovieError::FetchUnavailable(format!("Could not reach OMDb API: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(MovieError::FetchUnavailable(format!(
                "OMDb API answered with {}",
                response.status()
            )));
        }

        let body: OmdbResponse = response.json().await.map_err(|e| {
            MovieError::FetchUnavailable(format!("Unreadable OMDb response: {}", e))
        })?;

        body.into_details(title)
    }
}

impl MetadataFetcher for OmdbClient {
    async fn fetch(&self, title: &str) -> Option<MovieDetails> {
        match self.lookup(title).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}
