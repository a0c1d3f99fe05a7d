//! Active user tracking for an interactive session

/// Which user the current process is acting for
///
/// A session starts without a user and becomes active once a user is
/// selected or created. Switching users replaces the active one; there is
/// no way back to `NoUserSelected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    NoUserSelected,
    UserActive(String),
}

impl Session {
    /// Username of the active user, if any
    pub fn active_user(&self) -> Option<&str> {
        match self {
            Session::NoUserSelected => None,
            Session::UserActive(username) => Some(username),
        }
    }

    /// Make `username` the active user
    pub fn activate(&mut self, username: impl Into<String>) {
        *self = Session::UserActive(username.into());
    }
}
