//! Movie tracker models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub mod movie;

pub use movie::{Movie, MovieDetails, NewMovie};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}
