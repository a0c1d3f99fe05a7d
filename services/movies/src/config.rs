//! Configuration management for the movie tracker
//!
//! Settings are read from an optional `movies.toml` in the working directory
//! and can be overridden with environment variables.
//!
//! # Environment Variables
//!
//! - `MOVIES_OMDB_API_KEY`: OMDb API key (default: empty)
//! - `MOVIES_OMDB_BASE_URL`: OMDb endpoint (default: https://www.omdbapi.com/)
//! - `MOVIES_FETCH_TIMEOUT_SECS`: Timeout for a lookup in seconds (default: 10)
//! - `MOVIES_TEMPLATE_PATH`: HTML template for generated websites
//!   (default: templates/index_template.html, the built-in copy is used when absent)
//! - `MOVIES_OUTPUT_DIR`: Directory receiving `<username>.html` (default: generated_sites)
//!
//! Database settings live in `common::database::DatabaseConfig`.

use std::path::PathBuf;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/index_template.html";

/// Complete application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Credential for the OMDb API
    pub omdb_api_key: String,

    /// OMDb endpoint queried by title
    pub omdb_base_url: String,

    /// Upper bound for a single lookup
    pub fetch_timeout_secs: u64,

    /// Template the website generator fills in
    pub template_path: PathBuf,

    /// Where generated websites are written
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Load from `movies.toml` (if present) and `MOVIES_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("movies")
    }

    /// Load from the given config file name (extension optional) and the environment
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("omdb_api_key", "")?
            .set_default("omdb_base_url", DEFAULT_OMDB_BASE_URL)?
            .set_default("fetch_timeout_secs", 10_i64)?
            .set_default("template_path", DEFAULT_TEMPLATE_PATH)?
            .set_default("output_dir", "generated_sites")?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("MOVIES"))
            .build()?
            .try_deserialize()
    }
}
