//! Custom error types for the movie tracker

use common::error::DatabaseError;
use thiserror::Error;

/// Errors surfaced by the repository, the fetcher and the controller
#[derive(Error, Debug)]
pub enum MovieError {
    /// The username is already taken
    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    /// The username does not resolve to a stored user
    #[error("User '{0}' not found")]
    UnknownUser(String),

    /// The movie does not exist or belongs to another user
    #[error("Movie ID {movie_id} not found for {username}")]
    NotFound { username: String, movie_id: i64 },

    /// A value failed a domain check
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The store could not be reached or a statement failed
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// The metadata source could not be reached or has no such title
    #[error("Movie information unavailable: {0}")]
    FetchUnavailable(String),
}

impl From<sqlx::Error> for MovieError {
    fn from(err: sqlx::Error) -> Self {
        MovieError::Storage(DatabaseError::Query(err))
    }
}

/// Type alias for movie tracker results
pub type MovieResult<T> = Result<T, MovieError>;

/// Errors raised while generating a user's website
#[derive(Error, Debug)]
pub enum SiteError {
    /// The template file does not exist
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// The username cannot be used as a page file name
    #[error("Cannot generate a website for '{username}': {reason}")]
    InvalidUsername { username: String, reason: String },

    /// The user has nothing to render
    #[error("No movies available for {0}")]
    EmptyLibrary(String),

    /// Reading the template or writing the page failed
    #[error("Website I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for site generation results
pub type SiteResult<T> = Result<T, SiteError>;
