//! Decoding of the free-text "misc" cell of a match row.
//!
//! The cell has no schema: a leading text fragment carries the date and
//! optionally a kick-off time, followed by a loose mix of label fragments
//! ("Venue", "Att") and value fragments. Labels and values are matched up by
//! a small state machine over the fragment stream.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Australia::Melbourne;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Node};

lazy_static! {
    // Www dd-Mmm-yyyy, optionally followed by a 12-hour clock time.
    static ref DATE_TIME: Regex = Regex::new(
        r"(?P<date>[A-Za-z]{3} \d{2}-[A-Za-z]{3}-\d{4})(?:[^\d]*(?P<time>\d{1,2}:\d{2} [AP]M))?"
    )
    .unwrap();
}

/// Date, venue and attendance decoded from one misc cell. All fields are
/// optional; a field that cannot be determined stays absent.
#[derive(Debug, Clone, Default)]
pub struct MatchMetadata {
    pub date: Option<DateTime<Tz>>,
    pub venue: Option<String>,
    pub attendees: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingLabel {
    None,
    Venue,
    Attendees,
}

impl MatchMetadata {
    pub fn from_cell(cell: ElementRef) -> Self {
        Self::from_fragments(&cell_fragments(cell))
    }

    /// Decode from an ordered fragment stream. The first fragment is the
    /// date slot; labels and values are scanned from the rest.
    pub fn from_fragments(fragments: &[String]) -> Self {
        let date = parse_date(&fragments.join(" "));
        let (venue, attendees) = scan_labels(fragments.get(1..).unwrap_or(&[]));
        MatchMetadata {
            date,
            venue,
            attendees,
        }
    }
}

/// Flatten a cell's direct children into text fragments, in document order.
/// Raw text nodes are kept as-is; element children contribute their text.
pub fn cell_fragments(cell: ElementRef) -> Vec<String> {
    let mut fragments = Vec::new();
    for child in cell.children() {
        match child.value() {
            Node::Text(text) => fragments.push(text.to_string()),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    fragments.push(element.text().collect());
                }
            }
            _ => {}
        }
    }
    fragments
}

/// Extract the match date, anchored to the ground's civil timezone.
///
/// An absent or unparseable date is not an error: matches decode without one.
fn parse_date(text: &str) -> Option<DateTime<Tz>> {
    let caps = DATE_TIME.captures(text)?;
    let date_part = caps.name("date")?.as_str();

    let parsed = match caps.name("time") {
        Some(time) => NaiveDateTime::parse_from_str(
            &format!("{} {}", date_part, time.as_str()),
            "%a %d-%b-%Y %I:%M %p",
        ),
        None => {
            NaiveDate::parse_from_str(date_part, "%a %d-%b-%Y").map(|d| d.and_time(NaiveTime::MIN))
        }
    };

    let naive = match parsed {
        Ok(naive) => naive,
        Err(e) => {
            log::debug!("date parse error: {} | raw: {:?}", e, text);
            return None;
        }
    };

    match Melbourne.from_local_datetime(&naive).earliest() {
        Some(date) => Some(date),
        None => {
            log::debug!("{} does not exist in Australia/Melbourne", naive);
            None
        }
    }
}

/// Walk the fragment stream, pairing each "Venue"/"Att" label with the next
/// non-blank value fragment. Values with no pending label are ignored.
fn scan_labels(fragments: &[String]) -> (Option<String>, Option<u32>) {
    let mut venue = None;
    let mut attendees = None;
    let mut pending = PendingLabel::None;

    for fragment in fragments {
        if fragment.contains("Venue") {
            pending = PendingLabel::Venue;
        } else if fragment.contains("Att") {
            pending = PendingLabel::Attendees;
        } else if !fragment.trim().is_empty() {
            match pending {
                PendingLabel::Venue => venue = Some(fragment.trim().to_string()),
                PendingLabel::Attendees => attendees = parse_attendance(fragment),
                PendingLabel::None => {}
            }
            pending = PendingLabel::None;
        }
    }

    (venue, attendees)
}

fn parse_attendance(fragment: &str) -> Option<u32> {
    let digits: String = fragment
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    match digits.parse() {
        Ok(count) => Some(count),
        Err(e) => {
            log::debug!("attendance parse error: {} | raw: {:?}", e, fragment);
            None
        }
    }
}
