//! Decoders from season-page table markup to typed records.
//!
//! The season page carries no schema; structure is inferred from table
//! nesting, cell counts and substring sniffing. Top-level centered tables
//! alternate round header / round body; regular-season bodies nest one table
//! per match inside an 85%-width cell, finals bodies are a single match
//! table.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use super::misc::MatchMetadata;
use crate::error::{AflError, Result};
use crate::model::{Match, Round, Score, TeamMatch};

lazy_static! {
    static ref CENTER_TABLE: Selector = Selector::parse("center > table").unwrap();
    static ref TD: Selector = Selector::parse("td").unwrap();
    static ref MATCH_TABLE: Selector = Selector::parse(r#"td[width="85%"] table"#).unwrap();
    static ref BOLD: Selector = Selector::parse("b").unwrap();
}

/// The two recognized match-table shapes. Anything else is invalid markup.
enum RowShape {
    Regular,
    Bye,
}

fn classify_row(cells: &[ElementRef<'_>]) -> Result<RowShape> {
    match cells.len() {
        8 => Ok(RowShape::Regular),
        2 => Ok(RowShape::Bye),
        cells => Err(AflError::InvalidMatchMarkup { cells }),
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// The winner cell carries the name in bold, with surrounding margin text.
fn winner_name(cell: ElementRef) -> String {
    cell.select(&BOLD)
        .next()
        .map(cell_text)
        .unwrap_or_else(|| cell_text(cell))
}

/// Decode one team's participation from its name cell and quarter-score
/// cell. The score cell text is a whitespace-separated run of score tokens.
fn parse_team_match(name: ElementRef, scores: ElementRef) -> Result<TeamMatch> {
    let scores = scores
        .text()
        .collect::<String>()
        .split_whitespace()
        .map(Score::parse)
        .collect::<Result<Vec<_>>>()?;
    Ok(TeamMatch::new(cell_text(name), scores))
}

/// Parses a match from its `<table>` element.
///
/// A regular match has 8 cells (name, quarters, final display and the shared
/// misc/winner cells for both teams), a bye has 2 (name, bye label). Other
/// cell counts fail with [`AflError::InvalidMatchMarkup`].
pub fn parse_match(table: ElementRef) -> Result<Match> {
    let cells: Vec<ElementRef> = table.select(&TD).collect();

    match classify_row(&cells)? {
        RowShape::Regular => {
            let meta = MatchMetadata::from_cell(cells[3]);
            let mut decoded = Match {
                teams: Vec::new(),
                bye: false,
                winner: winner_name(cells[7]),
                attendees: meta.attendees,
                date: meta.date,
                venue: meta.venue,
            };
            decoded.teams = vec![
                parse_team_match(cells[0], cells[1])?,
                parse_team_match(cells[4], cells[5])?,
            ];
            Ok(decoded)
        }
        RowShape::Bye => {
            let name = cell_text(cells[0]);
            let mut decoded = Match {
                teams: Vec::new(),
                bye: true,
                winner: name.clone(),
                attendees: None,
                date: None,
                venue: None,
            };
            decoded.teams.push(TeamMatch::bye(name));
            Ok(decoded)
        }
    }
}

/// Parses a round from its title text and body table.
///
/// Finals rounds are a single match table and any decode failure is fatal to
/// the round. Regular rounds hold many nested match tables; a sub-table with
/// invalid match markup is skipped, everything else decodes independently.
pub fn parse_round(title: &str, body: ElementRef) -> Result<Round> {
    let matches = if title.contains("Final") {
        vec![parse_match(body)?]
    } else {
        let mut matches = Vec::new();
        for sub_table in body.select(&MATCH_TABLE) {
            match parse_match(sub_table) {
                Ok(decoded) => matches.push(decoded),
                Err(AflError::InvalidMatchMarkup { cells }) => {
                    log::debug!("{}: skipping sub-table with {} cells", title, cells);
                }
                Err(e) => return Err(e),
            }
        }
        matches
    };

    Ok(Round::new(title, matches))
}

/// Decode a full season page into its ordered rounds.
///
/// Top-level centered tables are filtered (ladder tables marked `sortable`
/// and the bare "Finals" section banner are not round data) and the
/// survivors pair up header/body in document order.
pub fn parse_season(html: &str) -> Result<Vec<Round>> {
    let document = Html::parse_document(html);

    let tables: Vec<ElementRef> = document
        .select(&CENTER_TABLE)
        .filter(|table| !is_sortable(table))
        .filter(|table| table.text().collect::<String>().trim() != "Finals")
        .collect();

    let mut rounds = Vec::new();
    for pair in tables.chunks(2) {
        let &[header, body] = pair else {
            let leading = pair.first().map(|t| cell_text(*t)).unwrap_or_default();
            log::warn!("ignoring dangling unpaired table: {:?}", leading);
            continue;
        };

        let title = header
            .select(&TD)
            .next()
            .map(cell_text)
            .unwrap_or_else(|| cell_text(header));

        rounds.push(parse_round(&title, body)?);
    }

    Ok(rounds)
}

fn is_sortable(table: &ElementRef) -> bool {
    table.value().classes().any(|class| class == "sortable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Australia::Melbourne;

    fn first_table(document: &Html) -> ElementRef<'_> {
        document
            .select(&Selector::parse("table").unwrap())
            .next()
            .unwrap()
    }

    fn match_table(home: &str, away: &str, winner: &str) -> String {
        format!(
            r##"<table>
<tr><td>{home}</td><td>1.1 2.2 3.3 4.4</td><td>28</td>
<td rowspan="2">Sun 15-Mar-2015 3:20 PM <b>Venue:</b> <a href="#">MCG</a> <b>Att:</b> 45,000</td></tr>
<tr><td>{away}</td><td>1.0 2.0 3.0 4.0</td><td>24</td>
<td><b>{winner}</b> won by 4 pts</td></tr>
</table>"##
        )
    }

    #[test]
    fn test_parse_regular_match() {
        let html = Html::parse_document(&match_table("Carlton", "Richmond", "Carlton"));
        let decoded = parse_match(first_table(&html)).unwrap();

        assert!(!decoded.bye);
        assert_eq!(decoded.teams.len(), 2);
        assert_eq!(decoded.teams[0].name, "Carlton");
        assert_eq!(decoded.teams[1].name, "Richmond");
        assert_eq!(decoded.teams[0].scores.len(), 4);
        assert_eq!(decoded.teams[0].final_score(&decoded).unwrap().total(), 28);
        assert_eq!(decoded.winner, "Carlton");
        assert_eq!(decoded.venue.as_deref(), Some("MCG"));
        assert_eq!(decoded.attendees, Some(45000));
        assert_eq!(
            decoded.date,
            Some(Melbourne.with_ymd_and_hms(2015, 3, 15, 15, 20, 0).unwrap())
        );
        assert_eq!(decoded.to_string(), "Carlton vs Richmond");
    }

    #[test]
    fn test_parse_match_with_unparseable_date() {
        let html = Html::parse_document(
            r##"<table>
<tr><td>Carlton</td><td>1.1 2.2 3.3 4.4</td><td>28</td>
<td rowspan="2">Xxx 99-Yyy-2015 <b>Venue:</b> <a href="#">MCG</a> <b>Att:</b> 45,000</td></tr>
<tr><td>Richmond</td><td>1.0 2.0 3.0 4.0</td><td>24</td><td><b>Carlton</b></td></tr>
</table>"##,
        );
        let decoded = parse_match(first_table(&html)).unwrap();
        assert!(decoded.date.is_none());
        assert_eq!(decoded.venue.as_deref(), Some("MCG"));
        assert_eq!(decoded.attendees, Some(45000));
    }

    #[test]
    fn test_parse_bye() {
        let html =
            Html::parse_document(r#"<table><tr><td>Fremantle</td><td>Bye</td></tr></table>"#);
        let decoded = parse_match(first_table(&html)).unwrap();

        assert!(decoded.bye);
        assert_eq!(decoded.teams.len(), 1);
        assert_eq!(decoded.teams[0].name, "Fremantle");
        assert_eq!(decoded.winner, "Fremantle");
        assert!(decoded.teams[0].final_score(&decoded).is_none());
        assert!(decoded.date.is_none());
        assert!(decoded.venue.is_none());
        assert!(decoded.attendees.is_none());
    }

    #[test]
    fn test_parse_match_rejects_other_shapes() {
        let html = Html::parse_document(
            r#"<table><tr><td>a</td><td>b</td><td>c</td><td>d</td><td>e</td></tr></table>"#,
        );
        let err = parse_match(first_table(&html)).unwrap_err();
        assert!(matches!(err, AflError::InvalidMatchMarkup { cells: 5 }));
    }

    #[test]
    fn test_malformed_score_propagates() {
        let html = Html::parse_document(
            r#"<table>
<tr><td>Carlton</td><td>1.1 2.x</td><td>28</td><td rowspan="2">Sun 15-Mar-2015</td></tr>
<tr><td>Richmond</td><td>1.0 2.0</td><td>24</td><td><b>Carlton</b></td></tr>
</table>"#,
        );
        let err = parse_match(first_table(&html)).unwrap_err();
        assert!(matches!(err, AflError::MalformedScore(_)));
    }

    #[test]
    fn test_regular_round_skips_invalid_sub_tables() {
        let bad = r#"<table><tr><td>a</td><td>b</td><td>c</td></tr></table>"#;
        let body = format!(
            r#"<table><tr><td width="85%">{}{}{}</td><td width="15%"></td></tr></table>"#,
            match_table("Carlton", "Richmond", "Carlton"),
            bad,
            match_table("Geelong", "Hawthorn", "Hawthorn"),
        );
        let html = Html::parse_document(&body);

        let round = parse_round("Round 1", first_table(&html)).unwrap();
        assert_eq!(round.title, "Round 1");
        assert_eq!(round.matches.len(), 2);
        assert_eq!(round.matches[0].teams[0].name, "Carlton");
        assert_eq!(round.matches[1].teams[0].name, "Geelong");
    }

    #[test]
    fn test_finals_round_is_single_match() {
        let html = Html::parse_document(&match_table("Carlton", "Richmond", "Carlton"));
        let round = parse_round("Grand Final", first_table(&html)).unwrap();
        assert_eq!(round.matches.len(), 1);
        assert!(round.is_finals());
    }

    #[test]
    fn test_malformed_finals_match_is_fatal() {
        let html = Html::parse_document(r#"<table><tr><td>only one cell</td></tr></table>"#);
        let err = parse_round("Grand Final", first_table(&html)).unwrap_err();
        assert!(matches!(err, AflError::InvalidMatchMarkup { cells: 1 }));
    }

    fn season_page(extra_trailing_header: bool) -> String {
        let round_body = format!(
            r#"<table><tr><td width="85%">{}{}</td></tr></table>"#,
            match_table("Carlton", "Richmond", "Carlton"),
            match_table("Geelong", "Hawthorn", "Hawthorn"),
        );
        let dangling = if extra_trailing_header {
            r#"<table><tr><td><b>Round 2</b></td></tr></table>"#
        } else {
            ""
        };
        format!(
            r#"<html><body><center>
<table class="sortable"><tr><td>Ladder</td></tr></table>
<table><tr><td><b>Round 1</b></td></tr></table>
{round_body}
<table><tr><td>Finals</td></tr></table>
<table><tr><td><b>Qualifying Final</b></td></tr></table>
{final_match}
{dangling}
</center></body></html>"#,
            final_match = match_table("Fremantle", "Sydney", "Fremantle"),
        )
    }

    #[test]
    fn test_parse_season() {
        let rounds = parse_season(&season_page(false)).unwrap();

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].title, "Round 1");
        assert_eq!(rounds[0].matches.len(), 2);
        assert_eq!(rounds[1].title, "Qualifying Final");
        assert_eq!(rounds[1].matches.len(), 1);
        assert_eq!(rounds[1].matches[0].teams[0].name, "Fremantle");
    }

    #[test]
    fn test_parse_season_ignores_dangling_table() {
        let rounds = parse_season(&season_page(true)).unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].title, "Qualifying Final");
    }
}
