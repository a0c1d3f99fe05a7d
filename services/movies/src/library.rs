//! Read-only views over a user's movie list

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Movie;

/// One line summary of a movie
pub fn format_movie(movie: &Movie) -> String {
    format!("{} ({}): {:.1}", movie.title, movie.year, movie.rating)
}

/// Movies ordered by rating, best first
///
/// The sort is stable, so movies with equal ratings keep their listing order.
pub fn sorted_by_rating<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<&'a Movie> {
    let mut sorted: Vec<&Movie> = movies.into_iter().collect();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
}

/// Movies whose title contains `query`, ignoring case
pub fn search<'a>(movies: impl IntoIterator<Item = &'a Movie>, query: &str) -> Vec<&'a Movie> {
    let needle = query.to_lowercase();
    movies
        .into_iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .collect()
}

/// Rating statistics for a non-empty list
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats<'a> {
    pub average: f64,
    pub median: f64,
    pub best: Vec<&'a Movie>,
    pub worst: Vec<&'a Movie>,
}

/// Compute rating statistics, or `None` for an empty list
pub fn rating_stats(movies: &[Movie]) -> Option<RatingStats<'_>> {
    if movies.is_empty() {
        return None;
    }

    let mut ratings: Vec<f64> = movies.iter().map(|movie| movie.rating).collect();
    ratings.sort_by(f64::total_cmp);

    let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
    let mid = ratings.len() / 2;
    let median = if ratings.len() % 2 == 0 {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
        ratings[mid]
    };

    let min = ratings[0];
    let max = ratings[ratings.len() - 1];

    Some(RatingStats {
        average,
        median,
        best: movies.iter().filter(|movie| movie.rating == max).collect(),
        worst: movies.iter().filter(|movie| movie.rating == min).collect(),
    })
}

/// Pick a movie at random
pub fn pick_random<'a, R: Rng + ?Sized>(movies: &'a [Movie], rng: &mut R) -> Option<&'a Movie> {
    movies.choose(rng)
}
