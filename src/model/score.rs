use crate::error::{AflError, Result};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, opt},
    IResult, Parser,
};
use serde::Serialize;
use std::fmt;

/// A team's score at a point in time, as a goals/behinds pair.
///
/// A goal is worth 6 points, a behind 1; `total` is the combined value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub goals: u32,
    pub behinds: u32,
}

/// Parse a score token: two dot-separated integers, optionally parenthesized.
fn score_token(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = opt(char('(')).parse(input)?;
    let (input, goals) = digit1.parse(input)?;
    let (input, _) = char('.').parse(input)?;
    let (input, behinds) = digit1.parse(input)?;
    let (input, _) = opt(char(')')).parse(input)?;
    Ok((input, (goals, behinds)))
}

impl Score {
    pub fn new(goals: u32, behinds: u32) -> Self {
        Score { goals, behinds }
    }

    /// Parses a string in the form `x.y` or `(x.y)`.
    pub fn parse(token: &str) -> Result<Self> {
        let malformed = || AflError::MalformedScore(token.to_string());

        let (_, (goals, behinds)) = all_consuming(score_token)
            .parse(token)
            .map_err(|_| malformed())?;

        Ok(Score {
            goals: goals.parse().map_err(|_| malformed())?,
            behinds: behinds.parse().map_err(|_| malformed())?,
        })
    }

    /// The calculated score as a single point value.
    pub fn total(&self) -> u32 {
        6 * self.goals + self.behinds
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.goals, self.behinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        let score = Score::parse("3.2").unwrap();
        assert_eq!(score.goals, 3);
        assert_eq!(score.behinds, 2);
        assert_eq!(score.total(), 20);
    }

    #[test]
    fn test_parse_parenthesized() {
        assert_eq!(Score::parse("(4.4)").unwrap(), Score::new(4, 4));
    }

    #[test]
    fn test_round_trip() {
        let score = Score::parse("10.12").unwrap();
        assert_eq!(Score::parse(&score.to_string()).unwrap(), score);
        assert_eq!(score.to_string(), "10.12");
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["32", "1.2.3", "a.b", "", "1.", ".2", "1 . 2"] {
            assert!(
                matches!(Score::parse(token), Err(AflError::MalformedScore(_))),
                "{:?} should fail",
                token
            );
        }
    }
}
