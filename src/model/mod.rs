pub mod matches;
pub mod rounds;
pub mod score;

pub use matches::{Match, TeamMatch};
pub use rounds::Round;
pub use score::Score;
