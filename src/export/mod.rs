//! Flatten decoded rounds into tabular records and write them out.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Match, Round, TeamMatch};

/// One match flattened to a single exportable row. Bye rows leave the away
/// columns empty.
#[derive(Debug, Serialize)]
pub struct MatchRow {
    pub round: String,
    pub home_team: String,
    pub home_quarters: String,
    pub home_final: Option<u32>,
    pub away_team: Option<String>,
    pub away_quarters: Option<String>,
    pub away_final: Option<u32>,
    pub winner: String,
    pub bye: bool,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub attendees: Option<u32>,
}

fn quarters(team: &TeamMatch) -> String {
    team.scores
        .iter()
        .map(|score| score.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn row(round: &Round, decoded: &Match) -> Option<MatchRow> {
    let home = decoded.teams.first()?;
    let away = decoded.teams.get(1);

    Some(MatchRow {
        round: round.title.clone(),
        home_team: home.name.clone(),
        home_quarters: quarters(home),
        home_final: home.final_score(decoded).map(|s| s.total()),
        away_team: away.map(|t| t.name.clone()),
        away_quarters: away.map(quarters),
        away_final: away.and_then(|t| t.final_score(decoded)).map(|s| s.total()),
        winner: decoded.winner.clone(),
        bye: decoded.bye,
        date: decoded.date.map(|d| d.to_rfc3339()),
        venue: decoded.venue.clone(),
        attendees: decoded.attendees,
    })
}

/// One row per match, in round order.
pub fn flatten(rounds: &[Round]) -> Vec<MatchRow> {
    rounds
        .iter()
        .flat_map(|r| r.matches.iter().filter_map(move |m| row(r, m)))
        .collect()
}

pub fn write_csv(rounds: &[Round], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in flatten(rounds) {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// JSON keeps the full nested round/match/score structure.
pub fn write_json(rounds: &[Round], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, rounds)?;
    Ok(())
}
