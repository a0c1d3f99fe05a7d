//! Movie model and related functionality

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Movie entity as stored for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster_url: Option<String>,
}

/// New movie creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster_url: Option<String>,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, year: i32, rating: f64) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            poster_url: None,
        }
    }

    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }
}

/// Normalized movie attributes returned by the metadata source
///
/// Year and rating are optional because the source reports them as free
/// text, and "N/A" is a common value for recent or obscure titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
}
