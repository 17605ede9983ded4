use super::score::Score;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// One team's participation in one match.
///
/// `scores` holds the team's score at the end of each quarter. There may be
/// 5 entries in the case of extra time, and none at all for a bye; in all
/// other cases the last entry is the team's final score.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMatch {
    pub name: String,
    pub scores: Vec<Score>,
}

impl TeamMatch {
    pub fn new(name: impl Into<String>, scores: Vec<Score>) -> Self {
        TeamMatch {
            name: name.into(),
            scores,
        }
    }

    /// A participation with no scores: the team sat this round out.
    pub fn bye(name: impl Into<String>) -> Self {
        TeamMatch::new(name, Vec::new())
    }

    /// The team's score at the end of the match, or `None` for a bye.
    ///
    /// The owning match is passed in for the bye lookup only; a `TeamMatch`
    /// never owns its match.
    pub fn final_score(&self, owner: &Match) -> Option<&Score> {
        if owner.bye {
            None
        } else {
            self.scores.last()
        }
    }
}

impl fmt::Display for TeamMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scores.last() {
            Some(score) => write!(f, "{} {}", self.name, score),
            None => write!(f, "{} Bye", self.name),
        }
    }
}

/// A single match: two teams, or one team with a bye.
///
/// Built in two phases: the shell is constructed with an empty team list and
/// the decoded metadata, then the `TeamMatch` entries are attached. Neither
/// piece is mutated after that.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub teams: Vec<TeamMatch>,
    pub bye: bool,
    pub winner: String,
    pub attendees: Option<u32>,
    pub date: Option<DateTime<Tz>>,
    pub venue: Option<String>,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.teams.first().map(|t| t.name.as_str()).unwrap_or("?");
        if self.bye {
            write!(f, "{} vs Bye", first)
        } else {
            let second = self.teams.get(1).map(|t| t.name.as_str()).unwrap_or("?");
            write!(f, "{} vs {}", first, second)
        }
    }
}
