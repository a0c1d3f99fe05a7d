//! Repositories for database operations

use std::collections::BTreeMap;

use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{MovieError, MovieResult};
use crate::models::{Movie, NewMovie, User};
use crate::validation::{validate_rating, validate_title, validate_username, validate_year};

/// Movie repository for database operations
///
/// Every movie operation is scoped by the owning username. Mutations match
/// on both the movie ID and the owner's ID inside a single statement, so a
/// guessed ID for another user's movie never touches that row.
#[derive(Clone)]
pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    /// Create a new movie repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all usernames, oldest account first
    pub async fn list_users(&self) -> MovieResult<Vec<String>> {
        let usernames = sqlx::query_scalar::<_, String>("SELECT username FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(usernames)
    }

    /// Create a new user with an empty library
    pub async fn create_user(&self, username: &str) -> MovieResult<User> {
        validate_username(username).map_err(MovieError::Validation)?;
        info!("Creating new user: {}", username);

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username)
            VALUES (?)
            RETURNING id, username
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(MovieError::DuplicateUser(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find the ID of a user by username
    pub async fn resolve_user_id(&self, username: &str) -> MovieResult<Option<i64>> {
        Self::find_user_id(&self.pool, username).await
    }

    /// Get all movies of a user keyed by movie ID
    ///
    /// An unknown user and a user without movies both yield an empty map.
    pub async fn list_movies(&self, username: &str) -> MovieResult<BTreeMap<i64, Movie>> {
        let Some(user_id) = self.resolve_user_id(username).await? else {
            debug!("No user named {}, nothing to list", username);
            return Ok(BTreeMap::new());
        };

        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, year, rating, poster_url
            FROM movies
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} movies for {}", movies.len(), username);
        Ok(movies.into_iter().map(|movie| (movie.id, movie)).collect())
    }

    /// Add a movie to a user's library and return its ID
    pub async fn add_movie(&self, username: &str, movie: &NewMovie) -> MovieResult<i64> {
        validate_title(&movie.title).map_err(MovieError::Validation)?;
        validate_year(movie.year).map_err(MovieError::Validation)?;
        validate_rating(movie.rating).map_err(MovieError::Validation)?;

        let mut tx = self.pool.begin().await?;
        let user_id = Self::find_user_id(&mut *tx, username)
            .await?
            .ok_or_else(|| MovieError::UnknownUser(username.to_string()))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO movies (title, year, rating, poster_url, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.rating)
        .bind(&movie.poster_url)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Movie '{}' added for {} with ID {}",
            movie.title, username, id
        );
        Ok(id)
    }

    /// Delete a movie owned by a user
    ///
    /// Returns false when the ID does not exist or belongs to someone else.
    pub async fn delete_movie(&self, username: &str, movie_id: i64) -> MovieResult<bool> {
        let mut tx = self.pool.begin().await?;
        let user_id = Self::find_user_id(&mut *tx, username)
            .await?
            .ok_or_else(|| MovieError::UnknownUser(username.to_string()))?;

        let result = sqlx::query("DELETE FROM movies WHERE id = ? AND user_id = ?")
            .bind(movie_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        info!(
            "Delete of movie ID {} for {}: {}",
            movie_id,
            username,
            if deleted { "removed" } else { "not found" }
        );
        Ok(deleted)
    }

    /// Replace the rating of a movie owned by a user
    ///
    /// Returns false when the ID does not exist or belongs to someone else.
    pub async fn update_rating(
        &self,
        username: &str,
        movie_id: i64,
        rating: f64,
    ) -> MovieResult<bool> {
        validate_rating(rating).map_err(MovieError::Validation)?;

        let mut tx = self.pool.begin().await?;
        let user_id = Self::find_user_id(&mut *tx, username)
            .await?
            .ok_or_else(|| MovieError::UnknownUser(username.to_string()))?;

        let result = sqlx::query("UPDATE movies SET rating = ? WHERE id = ? AND user_id = ?")
            .bind(rating)
            .bind(movie_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let updated = result.rows_affected() > 0;
        info!(
            "Rating update of movie ID {} for {}: {}",
            movie_id,
            username,
            if updated { "applied" } else { "not found" }
        );
        Ok(updated)
    }

    async fn find_user_id<'e, E>(executor: E, username: &str) -> MovieResult<Option<i64>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(executor)
            .await?;

        Ok(id)
    }
}
