//! Numbered menu actions

/// Everything a user can do once a session is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Exit,
    ListMovies,
    AddMovie,
    DeleteMovie,
    UpdateRating,
    SortedByRating,
    SearchMovies,
    Stats,
    RandomMovie,
    GenerateWebsite,
    SwitchUser,
}

impl MenuAction {
    /// Actions in the order they are shown
    pub const ALL: [MenuAction; 11] = [
        MenuAction::Exit,
        MenuAction::ListMovies,
        MenuAction::AddMovie,
        MenuAction::DeleteMovie,
        MenuAction::UpdateRating,
        MenuAction::SortedByRating,
        MenuAction::SearchMovies,
        MenuAction::Stats,
        MenuAction::RandomMovie,
        MenuAction::GenerateWebsite,
        MenuAction::SwitchUser,
    ];

    /// The number typed to pick this action
    pub fn number(self) -> u8 {
        match self {
            MenuAction::Exit => 0,
            MenuAction::ListMovies => 1,
            MenuAction::AddMovie => 2,
            MenuAction::DeleteMovie => 3,
            MenuAction::UpdateRating => 4,
            MenuAction::SortedByRating => 5,
            MenuAction::SearchMovies => 6,
            MenuAction::Stats => 7,
            MenuAction::RandomMovie => 8,
            MenuAction::GenerateWebsite => 9,
            MenuAction::SwitchUser => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Exit => "Exit",
            MenuAction::ListMovies => "List movies",
            MenuAction::AddMovie => "Add movie",
            MenuAction::DeleteMovie => "Delete movie",
            MenuAction::UpdateRating => "Update movie rating",
            MenuAction::SortedByRating => "Movies sorted by rating",
            MenuAction::SearchMovies => "Search movie",
            MenuAction::Stats => "Stats",
            MenuAction::RandomMovie => "Random movie",
            MenuAction::GenerateWebsite => "Generate website",
            MenuAction::SwitchUser => "Switch user",
        }
    }

    /// Parse a menu choice as typed by the user
    pub fn parse(choice: &str) -> Option<Self> {
        let number: u8 = choice.trim().parse().ok()?;
        Self::ALL
            .into_iter()
            .find(|action| action.number() == number)
    }
}

/// Menu text shown before each choice
pub fn render_menu(active_user: Option<&str>) -> String {
    let mut menu = match active_user {
        Some(username) => format!("\n********** {}'s Movies **********\n", username),
        None => "\n********** Movies **********\n".to_string(),
    };
    for action in MenuAction::ALL {
        menu.push_str(&format!("{}. {}\n", action.number(), action.label()));
    }
    menu
}
