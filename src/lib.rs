pub mod error;
pub mod export;
pub mod model;
pub mod parse;
pub mod scrape;

pub use error::{AflError, Result};
pub use model::*;
pub use scrape::{extract_season, MatchScraper};
