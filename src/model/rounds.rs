use super::matches::Match;
use serde::Serialize;
use std::fmt;

/// A single named stage of the season, with zero or more matches.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    pub title: String,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(title: impl Into<String>, matches: Vec<Match>) -> Self {
        Round {
            title: title.into(),
            matches,
        }
    }

    /// Finals rounds hold a single match table rather than a grid of
    /// sub-tables, and are decoded differently.
    pub fn is_finals(&self) -> bool {
        self.title.contains("Final")
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
