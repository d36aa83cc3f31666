//! Screen identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The screen currently selected by the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Marketing/landing page, the initial screen
    #[default]
    Landing,
    SignIn,
    SignUp,
    /// Job list for the signed-in user
    Dashboard,
    /// Upload form that creates a new job
    NewJob,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Landing,
        Screen::SignIn,
        Screen::SignUp,
        Screen::Dashboard,
        Screen::NewJob,
    ];

    /// Screens reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Screen::Landing | Screen::SignIn | Screen::SignUp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::SignIn => "signin",
            Screen::SignUp => "signup",
            Screen::Dashboard => "dashboard",
            Screen::NewJob => "newjob",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = crate::JobdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| crate::JobdeskError::validation(format!("Unknown screen: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_screens() {
        assert!(Screen::Landing.is_public());
        assert!(Screen::SignIn.is_public());
        assert!(Screen::SignUp.is_public());
        assert!(!Screen::Dashboard.is_public());
        assert!(!Screen::NewJob.is_public());
    }

    #[test]
    fn test_parse_and_display() {
        for screen in Screen::ALL {
            assert_eq!(screen.to_string().parse::<Screen>().unwrap(), screen);
        }
        assert!("settings".parse::<Screen>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&Screen::NewJob).unwrap();
        assert_eq!(json, "\"newjob\"");
    }
}
