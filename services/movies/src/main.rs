use anyhow::Result;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod error;
mod library;
mod menu;
mod models;
mod omdb;
mod prompt;
mod repositories;
mod session;
mod site;
mod validation;

use common::database::{DatabaseConfig, health_check, init_pool, init_schema};

use crate::{
    config::AppConfig, controller::Controller, omdb::OmdbClient, prompt::Prompter,
    repositories::MovieRepository, site::SiteGenerator,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    info!("Starting movie tracker");

    let app_config = AppConfig::load()?;
    if app_config.omdb_api_key.is_empty() {
        warn!("MOVIES_OMDB_API_KEY is not set, movie lookups will fail");
    }

    // Initialize database
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    init_schema(&pool).await?;

    if health_check(&pool).await? {
        info!("Database ready at {}", db_config.database_url);
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let repository = MovieRepository::new(pool.clone());
    let fetcher = OmdbClient::new(&app_config)?;
    let site = SiteGenerator::new(&app_config.template_path, &app_config.output_dir)
        .with_builtin_template();
    let prompter = Prompter::new(io::stdin().lock(), io::stdout());

    Controller::new(repository, fetcher, site, prompter)
        .run()
        .await?;

    pool.close().await;
    info!("Movie tracker stopped");

    Ok(())
}
