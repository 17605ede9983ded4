pub mod misc;
pub mod reader;

pub use misc::MatchMetadata;
pub use reader::{parse_match, parse_round, parse_season};
