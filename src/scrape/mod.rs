//! Season page retrieval from afltables.com.
//!
//! The only I/O in the crate lives here; everything downstream of
//! [`MatchScraper::scrape`] is a pure transformation of the fetched markup.

use std::thread;
use std::time::Duration;

use lazy_static::lazy_static;
use url::Url;

use crate::error::{AflError, Result};
use crate::model::Round;
use crate::parse;

lazy_static! {
    static ref BASE_URL: Url = Url::parse("https://afltables.com/afl/").unwrap();
}

/// Fetches season result pages and decodes them into rounds.
pub struct MatchScraper {
    client: reqwest::blocking::Client,
    base_url: Url,
    request_delay: Duration,
}

impl MatchScraper {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("afl-tables/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        MatchScraper {
            client,
            base_url: BASE_URL.clone(),
            request_delay: Duration::from_millis(500),
        }
    }

    /// Point the scraper at a different host (test servers).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Pause between requests when scraping several seasons.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// The results-page URL for the provided year.
    pub fn season_url(&self, year: u16) -> Result<Url> {
        Ok(self.base_url.join(&format!("seas/{}.html", year))?)
    }

    /// Fetch the raw season page. Transport failures and non-2xx statuses
    /// abort the whole season extraction.
    pub fn fetch_season_html(&self, year: u16) -> Result<String> {
        let url = self.season_url(year)?;
        log::debug!("fetching {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AflError::Status { year, status });
        }

        Ok(response.text()?)
    }

    /// Scrapes all the match data for the given year.
    pub fn scrape(&self, year: u16) -> Result<Vec<Round>> {
        let html = self.fetch_season_html(year)?;
        parse::parse_season(&html)
    }

    /// Scrape several seasons in order, pausing between requests. Each
    /// season succeeds or fails on its own.
    pub fn scrape_many(
        &self,
        years: impl IntoIterator<Item = u16>,
    ) -> Vec<(u16, Result<Vec<Round>>)> {
        let mut results = Vec::new();
        for (i, year) in years.into_iter().enumerate() {
            if i > 0 {
                thread::sleep(self.request_delay);
            }
            results.push((year, self.scrape(year)));
        }
        results
    }
}

impl Default for MatchScraper {
    fn default() -> Self {
        MatchScraper::new()
    }
}

/// Scrape one season with a default-configured scraper.
pub fn extract_season(year: u16) -> Result<Vec<Round>> {
    MatchScraper::new().scrape(year)
}
