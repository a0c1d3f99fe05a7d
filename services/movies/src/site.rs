//! Static website generation for a user's movie list

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::{Captures, Regex};
use tracing::{info, warn};

use crate::error::{SiteError, SiteResult};
use crate::models::Movie;
use crate::validation::validate_username;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const MOVIE_GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";
pub const DATE_PLACEHOLDER: &str = "__TEMPLATE_DATE__";

/// Page template compiled into the binary
pub const BUILTIN_TEMPLATE: &str = include_str!("../templates/index_template.html");

/// Replace every `__TEMPLATE_<NAME>__` placeholder in `template`
///
/// Placeholders without a substitution are removed.
pub fn render(template: &str, substitutions: &HashMap<&str, String>) -> String {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"__TEMPLATE_[A-Z0-9_]*?__").expect("Failed to compile placeholder regex")
    });

    regex
        .replace_all(template, |caps: &Captures| {
            substitutions.get(&caps[0]).cloned().unwrap_or_default()
        })
        .into_owned()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Grid entry for one movie
pub fn movie_fragment(movie: &Movie) -> String {
    let poster = movie
        .poster_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| {
            format!(
                "<img class=\"movie-poster\" src=\"{}\" alt=\"{}\"/>",
                escape_html(url),
                escape_html(&movie.title)
            )
        })
        .unwrap_or_default();

    format!(
        "<li>\n  <div class=\"movie\">\n    {}\n    <div class=\"movie-title\">{}</div>\n    <div class=\"movie-year\">{}</div>\n    <div class=\"movie-rating\">Rating: {:.1}</div>\n  </div>\n</li>\n",
        poster,
        escape_html(&movie.title),
        movie.year,
        movie.rating
    )
}

/// Values for the placeholders of a user's page
pub fn page_substitutions(
    username: &str,
    movies: &[Movie],
    generated_at: DateTime<Local>,
) -> HashMap<&'static str, String> {
    let grid: String = movies.iter().map(movie_fragment).collect();

    HashMap::from([
        (
            TITLE_PLACEHOLDER,
            escape_html(&format!("{}'s Movie Library", username)),
        ),
        (MOVIE_GRID_PLACEHOLDER, grid),
        (
            DATE_PLACEHOLDER,
            generated_at.format("%Y-%m-%d %H:%M").to_string(),
        ),
    ])
}

/// Writes one HTML page per user from a shared template
#[derive(Debug, Clone)]
pub struct SiteGenerator {
    template_path: PathBuf,
    output_dir: PathBuf,
    fallback_template: Option<&'static str>,
}

impl SiteGenerator {
    pub fn new(template_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_dir: output_dir.into(),
            fallback_template: None,
        }
    }

    /// Use the compiled-in template when the template file is absent
    pub fn with_builtin_template(mut self) -> Self {
        self.fallback_template = Some(BUILTIN_TEMPLATE);
        self
    }

    /// Where the page of `username` is written
    pub fn page_path(&self, username: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", username))
    }

    /// Render and write the page of `username`
    pub fn generate(&self, username: &str, movies: &[Movie]) -> SiteResult<PathBuf> {
        self.generate_at(username, movies, Local::now())
    }

    pub fn generate_at(
        &self,
        username: &str,
        movies: &[Movie],
        generated_at: DateTime<Local>,
    ) -> SiteResult<PathBuf> {
        // The name becomes a file name under output_dir
        validate_username(username).map_err(|reason| SiteError::InvalidUsername {
            username: username.to_string(),
            reason,
        })?;

        let template = self.read_template()?;

        if movies.is_empty() {
            return Err(SiteError::EmptyLibrary(username.to_string()));
        }

        let substitutions = page_substitutions(username, movies, generated_at);
        let page = render(&template, &substitutions);

        fs::create_dir_all(&self.output_dir)?;
        let path = self.page_path(username);
        fs::write(&path, page)?;

        info!("Website for {} written to {}", username, path.display());
        Ok(path)
    }

    fn read_template(&self) -> SiteResult<String> {
        if self.template_path.is_file() {
            return Ok(fs::read_to_string(&self.template_path)?);
        }

        match self.fallback_template {
            Some(template) => {
                warn!(
                    "Template {} not found, using the built-in template",
                    self.template_path.display()
                );
                Ok(template.to_string())
            }
            None => Err(SiteError::TemplateNotFound(
                self.template_path.display().to_string(),
            )),
        }
    }
}
