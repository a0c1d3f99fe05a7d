//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Earliest year accepted for a movie
pub const MIN_YEAR: i32 = 1888;
/// Latest year accepted for a movie
pub const MAX_YEAR: i32 = 2100;
/// Lowest rating accepted for a movie
pub const MIN_RATING: f64 = 1.0;
/// Highest rating accepted for a movie
pub const MAX_RATING: f64 = 10.0;

/// Validate username
///
/// Usernames double as file names for generated pages, so only a
/// conservative character set is accepted.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.chars().count() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(
            "Username can only contain letters, numbers, underscores and hyphens".to_string(),
        );
    }

    Ok(())
}

/// Validate movie title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    Ok(())
}

/// Validate release year
pub fn validate_year(year: i32) -> Result<(), String> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(format!(
            "Year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        ));
    }

    Ok(())
}

/// Validate rating
pub fn validate_rating(rating: f64) -> Result<(), String> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(format!(
            "Rating must be between {:.1} and {:.1}, got {}",
            MIN_RATING, MAX_RATING, rating
        ));
    }

    Ok(())
}
