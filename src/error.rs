use thiserror::Error;

#[derive(Error, Debug)]
pub enum AflError {
    #[error("Malformed score token: {0:?}")]
    MalformedScore(String),

    #[error("Invalid markup for a match: expected 8 or 2 cells, found {cells}")]
    InvalidMatchMarkup { cells: usize },

    #[error("Season page for {year} returned HTTP {status}")]
    Status {
        year: u16,
        status: reqwest::StatusCode,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AflError>;
