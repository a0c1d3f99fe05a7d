//! Interactive menu loop driving the repository
//!
//! The controller owns its collaborators and takes the session as an
//! explicit argument on every operation. Repository failures are reported
//! to the user and the loop carries on; only I/O failure on the terminal
//! itself ends the run.

use std::io::{self, BufRead, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, warn};

use crate::error::MovieError;
use crate::library::{self, format_movie};
use crate::menu::{MenuAction, render_menu};
use crate::models::{Movie, NewMovie};
use crate::omdb::MetadataFetcher;
use crate::prompt::Prompter;
use crate::repositories::MovieRepository;
use crate::session::Session;
use crate::site::SiteGenerator;
use crate::validation::{MAX_RATING, MAX_YEAR, MIN_RATING, MIN_YEAR};

/// Whether the menu loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Controller<F, R, W> {
    repository: MovieRepository,
    fetcher: F,
    site: SiteGenerator,
    prompter: Prompter<R, W>,
    rng: StdRng,
}

impl<F, R, W> Controller<F, R, W>
where
    F: MetadataFetcher,
    R: BufRead,
    W: Write,
{
    pub fn new(
        repository: MovieRepository,
        fetcher: F,
        site: SiteGenerator,
        prompter: Prompter<R, W>,
    ) -> Self {
        Self {
            repository,
            fetcher,
            site,
            prompter,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed random source for the random movie pick
    #[cfg(test)]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[cfg(test)]
    pub fn prompter(&self) -> &Prompter<R, W> {
        &self.prompter
    }

    /// Select a user, then serve menu choices until exit or end of input
    pub async fn run(&mut self) -> io::Result<()> {
        let mut session = Session::default();

        match self.drive(&mut session).await {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                self.prompter.say("\nBye!")?;
                Ok(())
            }
            other => other,
        }
    }

    async fn drive(&mut self, session: &mut Session) -> io::Result<()> {
        self.prompter.say("Welcome to the Movies App!")?;
        self.choose_user(session).await?;

        loop {
            self.prompter.say(render_menu(session.active_user()))?;
            let choice = self.prompter.ask("Enter choice (0-10): ")?;

            let Some(action) = MenuAction::parse(&choice) else {
                self.prompter.say("Invalid choice, please try again.")?;
                continue;
            };

            if self.dispatch(session, action).await? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Run one menu action
    pub async fn dispatch(
        &mut self,
        session: &mut Session,
        action: MenuAction,
    ) -> io::Result<Flow> {
        match action {
            MenuAction::Exit => {
                self.prompter.say("Bye!")?;
                return Ok(Flow::Exit);
            }
            MenuAction::ListMovies => self.list_movies(session).await?,
            MenuAction::AddMovie => self.add_movie(session).await?,
            MenuAction::DeleteMovie => self.delete_movie(session).await?,
            MenuAction::UpdateRating => self.update_rating(session).await?,
            MenuAction::SortedByRating => self.sorted_by_rating(session).await?,
            MenuAction::SearchMovies => self.search_movies(session).await?,
            MenuAction::Stats => self.stats(session).await?,
            MenuAction::RandomMovie => self.random_movie(session).await?,
            MenuAction::GenerateWebsite => self.generate_website(session).await?,
            MenuAction::SwitchUser => self.choose_user(session).await?,
        }

        Ok(Flow::Continue)
    }

    /// Pick an existing user or create a new one and make it active
    ///
    /// If the user list cannot be loaded while a user is already active,
    /// that user stays active.
    pub async fn choose_user(&mut self, session: &mut Session) -> io::Result<()> {
        loop {
            let users = match self.repository.list_users().await {
                Ok(users) => users,
                Err(e) => {
                    self.report(e)?;
                    if session.active_user().is_some() {
                        return Ok(());
                    }
                    Vec::new()
                }
            };

            self.prompter.say("\nSelect a user:")?;
            for (index, username) in users.iter().enumerate() {
                self.prompter.say(format!("{}. {}", index + 1, username))?;
            }
            let create_choice = users.len() + 1;
            self.prompter
                .say(format!("{}. Create new user", create_choice))?;

            let choice = self
                .prompter
                .ask_number::<usize>("Enter choice: ", Some((1, create_choice)))?;

            if choice < create_choice {
                let username = users[choice - 1].clone();
                self.prompter
                    .say(format!("\nWelcome back, {}! 🎬", username))?;
                session.activate(username);
                return Ok(());
            }

            let username = self.prompter.ask_non_empty("Enter new username: ")?;
            match self.repository.create_user(&username).await {
                Ok(user) => {
                    self.prompter
                        .say(format!("User '{}' created successfully.", user.username))?;
                    session.activate(user.username);
                    return Ok(());
                }
                Err(e) => self.report(e)?,
            }
        }
    }

    async fn list_movies(&mut self, session: &Session) -> io::Result<()> {
        let Some((username, movies)) = self.user_movies(session).await? else {
            return Ok(());
        };

        self.prompter
            .say(format!("\n{} movies in total", movies.len()))?;
        for movie in &movies {
            self.prompter.say(format_movie(movie))?;
        }
        if movies.is_empty() {
            self.prompter
                .say(format!("No movies found for {}.", username))?;
        }
        Ok(())
    }

    async fn add_movie(&mut self, session: &Session) -> io::Result<()> {
        let Some(username) = self.require_user(session)? else {
            return Ok(());
        };

        let title = self.prompter.ask_non_empty("Enter movie title: ")?;
        let Some(details) = self.fetcher.fetch(&title).await else {
            self.report(MovieError::FetchUnavailable(format!(
                "'{}' was not found or the movie database is unreachable",
                title
            )))?;
            return Ok(());
        };

        let year = match details
            .year
            .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        {
            Some(year) => year,
            None => self.prompter.ask_number(
                &format!(
                    "Release year of '{}' is unknown, enter it: ",
                    details.title
                ),
                Some((MIN_YEAR, MAX_YEAR)),
            )?,
        };
        let rating = match details
            .rating
            .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
        {
            Some(rating) => rating,
            None => self.prompter.ask_number(
                &format!(
                    "No rating found for '{}', enter your own (1-10): ",
                    details.title
                ),
                Some((MIN_RATING, MAX_RATING)),
            )?,
        };

        let mut movie = NewMovie::new(details.title, year, rating);
        if let Some(poster_url) = details.poster_url {
            movie = movie.with_poster(poster_url);
        }

        match self.repository.add_movie(&username, &movie).await {
            Ok(id) => self.prompter.say(format!(
                "Movie '{}' ({}) added for {} with ID {}.",
                movie.title, movie.year, username, id
            )),
            Err(e) => self.report(e),
        }
    }

    async fn delete_movie(&mut self, session: &Session) -> io::Result<()> {
        let Some((username, movie)) = self.select_movie(session, "delete").await? else {
            return Ok(());
        };

        match self.repository.delete_movie(&username, movie.id).await {
            Ok(true) => self
                .prompter
                .say(format!("Movie '{}' deleted.", movie.title)),
            Ok(false) => self.report(MovieError::NotFound {
                username,
                movie_id: movie.id,
            }),
            Err(e) => self.report(e),
        }
    }

    async fn update_rating(&mut self, session: &Session) -> io::Result<()> {
        let Some((username, movie)) = self.select_movie(session, "rate").await? else {
            return Ok(());
        };

        let rating = self.prompter.ask_number(
            &format!("Enter new rating for '{}' (1-10): ", movie.title),
            Some((MIN_RATING, MAX_RATING)),
        )?;

        match self
            .repository
            .update_rating(&username, movie.id, rating)
            .await
        {
            Ok(true) => self
                .prompter
                .say(format!("Rating of '{}' updated to {:.1}.", movie.title, rating)),
            Ok(false) => self.report(MovieError::NotFound {
                username,
                movie_id: movie.id,
            }),
            Err(e) => self.report(e),
        }
    }

    async fn sorted_by_rating(&mut self, session: &Session) -> io::Result<()> {
        let Some((_, movies)) = self.user_movies(session).await? else {
            return Ok(());
        };

        self.prompter.say("\nMovies sorted by rating:")?;
        for movie in library::sorted_by_rating(&movies) {
            self.prompter.say(format_movie(movie))?;
        }
        Ok(())
    }

    async fn search_movies(&mut self, session: &Session) -> io::Result<()> {
        let Some((_, movies)) = self.user_movies(session).await? else {
            return Ok(());
        };

        let query = self.prompter.ask_non_empty("Enter part of movie name: ")?;
        let matches = library::search(&movies, &query);
        if matches.is_empty() {
            return self
                .prompter
                .say(format!("No movies found matching '{}'.", query));
        }
        for movie in matches {
            self.prompter.say(format_movie(movie))?;
        }
        Ok(())
    }

    async fn stats(&mut self, session: &Session) -> io::Result<()> {
        let Some((username, movies)) = self.user_movies(session).await? else {
            return Ok(());
        };

        let Some(stats) = library::rating_stats(&movies) else {
            return self
                .prompter
                .say(format!("No movies found for {}.", username));
        };

        self.prompter
            .say(format!("\nAverage rating: {:.2}", stats.average))?;
        self.prompter
            .say(format!("Median rating: {:.2}", stats.median))?;
        self.prompter.say("Best movie(s):")?;
        for movie in &stats.best {
            self.prompter.say(format!("  {}", format_movie(movie)))?;
        }
        self.prompter.say("Worst movie(s):")?;
        for movie in &stats.worst {
            self.prompter.say(format!("  {}", format_movie(movie)))?;
        }
        Ok(())
    }

    async fn random_movie(&mut self, session: &Session) -> io::Result<()> {
        let Some((username, movies)) = self.user_movies(session).await? else {
            return Ok(());
        };

        match library::pick_random(&movies, &mut self.rng) {
            Some(movie) => self
                .prompter
                .say(format!("Your movie for tonight: {}", format_movie(movie))),
            None => self
                .prompter
                .say(format!("No movies found for {}.", username)),
        }
    }

    async fn generate_website(&mut self, session: &Session) -> io::Result<()> {
        let Some((username, movies)) = self.user_movies(session).await? else {
            return Ok(());
        };

        match self.site.generate(&username, &movies) {
            Ok(path) => self
                .prompter
                .say(format!("Website was generated successfully: {}", path.display())),
            Err(e) => {
                warn!("Website generation for {} failed: {}", username, e);
                self.prompter.say(e)
            }
        }
    }

    /// Active username, or a notice that none is selected
    fn require_user(&mut self, session: &Session) -> io::Result<Option<String>> {
        match session.active_user() {
            Some(username) => Ok(Some(username.to_string())),
            None => {
                self.prompter
                    .say("No active user selected. Please select a user first.")?;
                Ok(None)
            }
        }
    }

    /// Active username and its movies in listing order
    async fn user_movies(&mut self, session: &Session) -> io::Result<Option<(String, Vec<Movie>)>> {
        let Some(username) = self.require_user(session)? else {
            return Ok(None);
        };

        match self.repository.list_movies(&username).await {
            Ok(movies) => Ok(Some((username, movies.into_values().collect()))),
            Err(e) => {
                self.report(e)?;
                Ok(None)
            }
        }
    }

    /// Let the user pick one of their movies by its 1-based position
    async fn select_movie(
        &mut self,
        session: &Session,
        verb: &str,
    ) -> io::Result<Option<(String, Movie)>> {
        let Some((username, mut movies)) = self.user_movies(session).await? else {
            return Ok(None);
        };

        if movies.is_empty() {
            self.prompter
                .say(format!("No movies found for {}.", username))?;
            return Ok(None);
        }

        for (index, movie) in movies.iter().enumerate() {
            self.prompter
                .say(format!("{}. {}", index + 1, format_movie(movie)))?;
        }
        let choice = self.prompter.ask_number::<usize>(
            &format!("Enter the number of the movie to {}: ", verb),
            Some((1, movies.len())),
        )?;

        Ok(Some((username, movies.swap_remove(choice - 1))))
    }

    fn report(&mut self, err: MovieError) -> io::Result<()> {
        match &err {
            MovieError::Storage(_) => error!("{}", err),
            _ => warn!("{}", err),
        }
        self.prompter.say(format!("Error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieDetails;
    use common::database::{DatabaseConfig, init_pool, init_schema};
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Fetcher returning a canned answer and remembering what was asked
    struct StubFetcher {
        answer: Option<MovieDetails>,
        calls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn returning(answer: Option<MovieDetails>) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MetadataFetcher for StubFetcher {
        async fn fetch(&self, title: &str) -> Option<MovieDetails> {
            self.calls.lock().unwrap().push(title.to_string());
            self.answer.clone()
        }
    }

    type TestController = Controller<StubFetcher, Cursor<Vec<u8>>, Vec<u8>>;

    async fn repository() -> MovieRepository {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        init_schema(&pool).await.unwrap();
        MovieRepository::new(pool)
    }

    fn controller(
        repository: &MovieRepository,
        fetcher: StubFetcher,
        input: &str,
        output_dir: PathBuf,
    ) -> TestController {
        let site = SiteGenerator::new(crate::config::DEFAULT_TEMPLATE_PATH, output_dir)
            .with_builtin_template();
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Controller::new(repository.clone(), fetcher, site, prompter)
            .with_rng(StdRng::seed_from_u64(0))
    }

    fn unused_dir() -> PathBuf {
        std::env::temp_dir().join("movies-controller-unused")
    }

    fn output(controller: &TestController) -> String {
        String::from_utf8(controller.prompter().output().clone()).unwrap()
    }

    fn inception() -> MovieDetails {
        MovieDetails {
            title: "Inception".to_string(),
            year: Some(2010),
            rating: Some(8.8),
            poster_url: Some("https://example.com/inception.jpg".to_string()),
        }
    }

    async fn with_movies(repo: &MovieRepository, username: &str, movies: &[(&str, f64)]) {
        repo.create_user(username).await.unwrap();
        for (title, rating) in movies {
            repo.add_movie(username, &NewMovie::new(*title, 2000, *rating))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_choose_existing_user() {
        let repo = repository().await;
        repo.create_user("User1").await.unwrap();
        repo.create_user("User2").await.unwrap();

        let mut c = controller(&repo, StubFetcher::returning(None), "2\n", unused_dir());
        let mut session = Session::default();
        c.choose_user(&mut session).await.unwrap();

        assert_eq!(session.active_user(), Some("User2"));
    }

    #[tokio::test]
    async fn test_create_new_user() {
        let repo = repository().await;
        repo.create_user("User1").await.unwrap();
        repo.create_user("User2").await.unwrap();

        let mut c = controller(
            &repo,
            StubFetcher::returning(None),
            "3\nNewUser\n",
            unused_dir(),
        );
        let mut session = Session::default();
        c.choose_user(&mut session).await.unwrap();

        assert_eq!(session.active_user(), Some("NewUser"));
        assert_eq!(
            repo.list_users().await.unwrap(),
            vec!["User1", "User2", "NewUser"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_user_is_reported_and_asked_again() {
        let repo = repository().await;
        repo.create_user("alice").await.unwrap();

        let mut c = controller(
            &repo,
            StubFetcher::returning(None),
            "2\nalice\n2\nbob\n",
            unused_dir(),
        );
        let mut session = Session::default();
        c.choose_user(&mut session).await.unwrap();

        assert_eq!(session.active_user(), Some("bob"));
        assert!(output(&c).contains("User 'alice' already exists"));
    }

    #[tokio::test]
    async fn test_movie_actions_need_an_active_user() {
        let repo = repository().await;
        let fetcher = StubFetcher::returning(Some(inception()));
        let mut c = controller(&repo, fetcher, "", unused_dir());
        let mut session = Session::default();

        for action in [
            MenuAction::ListMovies,
            MenuAction::AddMovie,
            MenuAction::DeleteMovie,
            MenuAction::UpdateRating,
            MenuAction::GenerateWebsite,
        ] {
            assert_eq!(
                c.dispatch(&mut session, action).await.unwrap(),
                Flow::Continue
            );
        }

        assert_eq!(output(&c).matches("No active user selected").count(), 5);
        assert!(c.fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_movie_uses_fetched_details() {
        let repo = repository().await;
        repo.create_user("alice").await.unwrap();
        let mut c = controller(
            &repo,
            StubFetcher::returning(Some(inception())),
            "inception\n",
            unused_dir(),
        );
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::AddMovie).await.unwrap();

        assert_eq!(c.fetcher.calls(), vec!["inception"]);
        let movies: Vec<Movie> = repo
            .list_movies("alice")
            .await
            .unwrap()
            .into_values()
            .collect();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[0].year, 2010);
        assert_eq!(movies[0].rating, 8.8);
        assert_eq!(
            movies[0].poster_url.as_deref(),
            Some("https://example.com/inception.jpg")
        );
    }

    #[tokio::test]
    async fn test_add_movie_not_found_leaves_repository_untouched() {
        let repo = repository().await;
        repo.create_user("alice").await.unwrap();
        let mut c = controller(
            &repo,
            StubFetcher::returning(None),
            "NonexistentTitleXYZ\n",
            unused_dir(),
        );
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::AddMovie).await.unwrap();

        assert!(repo.list_movies("alice").await.unwrap().is_empty());
        assert!(output(&c).contains("was not found or the movie database is unreachable"));
    }

    #[tokio::test]
    async fn test_add_movie_asks_for_missing_rating() {
        let repo = repository().await;
        repo.create_user("alice").await.unwrap();
        let details = MovieDetails {
            rating: None,
            ..inception()
        };
        let mut c = controller(
            &repo,
            StubFetcher::returning(Some(details)),
            "Inception\nabc\n11\n7.5\n",
            unused_dir(),
        );
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::AddMovie).await.unwrap();

        let movies = repo.list_movies("alice").await.unwrap();
        assert_eq!(movies.values().next().unwrap().rating, 7.5);
    }

    #[tokio::test]
    async fn test_delete_by_index_retries_out_of_range() {
        let repo = repository().await;
        with_movies(&repo, "alice", &[("First", 5.0), ("Second", 6.0)]).await;
        let mut c = controller(&repo, StubFetcher::returning(None), "5\n2\n", unused_dir());
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::DeleteMovie)
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .list_movies("alice")
            .await
            .unwrap()
            .into_values()
            .map(|movie| movie.title)
            .collect();
        assert_eq!(titles, vec!["First"]);
        assert!(output(&c).contains("Please enter a value between 1 and 2"));
        assert!(output(&c).contains("Movie 'Second' deleted."));
    }

    #[tokio::test]
    async fn test_update_rating_by_index() {
        let repo = repository().await;
        with_movies(&repo, "alice", &[("Movie1", 7.0)]).await;
        let mut c = controller(&repo, StubFetcher::returning(None), "1\n9.5\n", unused_dir());
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::UpdateRating)
            .await
            .unwrap();

        let movies = repo.list_movies("alice").await.unwrap();
        assert_eq!(movies.values().next().unwrap().rating, 9.5);
    }

    #[tokio::test]
    async fn test_sorted_by_rating_keeps_ties_in_order() {
        let repo = repository().await;
        with_movies(&repo, "alice", &[("A", 7.0), ("B", 9.0), ("C", 7.0)]).await;
        let mut c = controller(&repo, StubFetcher::returning(None), "", unused_dir());
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::SortedByRating)
            .await
            .unwrap();

        let out = output(&c);
        let lines: Vec<&str> = out
            .lines()
            .filter(|line| line.contains("(2000)"))
            .collect();
        assert_eq!(
            lines,
            vec!["B (2000): 9.0", "A (2000): 7.0", "C (2000): 7.0"]
        );
    }

    #[tokio::test]
    async fn test_search_stats_and_random() {
        let repo = repository().await;
        with_movies(&repo, "alice", &[("The Matrix", 8.7), ("Heat", 8.3)]).await;
        let mut c = controller(&repo, StubFetcher::returning(None), "matrix\n", unused_dir());
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::SearchMovies)
            .await
            .unwrap();
        c.dispatch(&mut session, MenuAction::Stats).await.unwrap();
        c.dispatch(&mut session, MenuAction::RandomMovie)
            .await
            .unwrap();

        let out = output(&c);
        assert!(out.contains("The Matrix (2000): 8.7"));
        assert!(out.contains("Average rating: 8.50"));
        assert!(out.contains("Best movie(s):\n  The Matrix (2000): 8.7"));
        assert!(out.contains("Worst movie(s):\n  Heat (2000): 8.3"));
        assert!(out.contains("Your movie for tonight: "));
    }

    #[tokio::test]
    async fn test_generate_website_for_active_user() {
        let repo = repository().await;
        with_movies(&repo, "alice", &[("Movie1", 7.0)]).await;
        let dir = std::env::temp_dir().join(format!("movies-controller-{}", std::process::id()));
        let mut c = controller(&repo, StubFetcher::returning(None), "", dir.clone());
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::GenerateWebsite)
            .await
            .unwrap();

        let page = std::fs::read_to_string(dir.join("alice.html")).unwrap();
        assert!(page.contains("alice's Movie Library"));
        assert!(page.contains("Movie1"));
        assert!(output(&c).contains("Website was generated successfully"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_stored_username_unsafe_as_file_name_gets_no_website() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        init_schema(&pool).await.unwrap();
        sqlx::query("INSERT INTO users (username) VALUES ('../escaped')")
            .execute(&pool)
            .await
            .unwrap();
        let repo = MovieRepository::new(pool);
        repo.add_movie("../escaped", &NewMovie::new("Movie1", 2000, 7.0))
            .await
            .unwrap();

        let root =
            std::env::temp_dir().join(format!("movies-controller-escape-{}", std::process::id()));
        let out = root.join("generated_sites");
        let mut c = controller(&repo, StubFetcher::returning(None), "", out.clone());
        let mut session = Session::UserActive("../escaped".to_string());

        c.dispatch(&mut session, MenuAction::GenerateWebsite)
            .await
            .unwrap();

        assert!(output(&c).contains("Cannot generate a website for '../escaped'"));
        assert!(!root.join("escaped.html").exists());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_switch_user() {
        let repo = repository().await;
        repo.create_user("alice").await.unwrap();
        repo.create_user("bob").await.unwrap();
        let mut c = controller(&repo, StubFetcher::returning(None), "2\n", unused_dir());
        let mut session = Session::UserActive("alice".to_string());

        c.dispatch(&mut session, MenuAction::SwitchUser)
            .await
            .unwrap();

        assert_eq!(session, Session::UserActive("bob".to_string()));
    }

    #[tokio::test]
    async fn test_full_session() {
        let repo = repository().await;
        let mut c = controller(
            &repo,
            StubFetcher::returning(Some(inception())),
            "1\nalice\n42\n2\nInception\n1\n0\n",
            unused_dir(),
        );

        c.run().await.unwrap();

        let out = output(&c);
        assert!(out.contains("User 'alice' created successfully."));
        assert!(out.contains("Invalid choice, please try again."));
        assert!(out.contains("1 movies in total\nInception (2010): 8.8"));
        assert!(out.trim_end().ends_with("Bye!"));
        assert_eq!(repo.list_movies("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_end_of_input_ends_the_session() {
        let repo = repository().await;
        let mut c = controller(&repo, StubFetcher::returning(None), "", unused_dir());

        c.run().await.unwrap();

        assert!(output(&c).trim_end().ends_with("Bye!"));
    }
}
