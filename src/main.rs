use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use afl_tables::export;
use afl_tables::{MatchScraper, Round};

#[derive(Parser)]
#[command(name = "afl-tables")]
#[command(about = "Scrape AFL match results from afltables.com", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one or more seasons and write the records to a file
    Fetch {
        /// First (or only) season year, e.g. 2015
        year: u16,

        /// Scrape every season up to and including this year
        #[arg(long)]
        through: Option<u16>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Print a per-round summary of one season
    Info {
        /// Season year, e.g. 2015
        year: u16,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            year,
            through,
            output,
            format,
        } => fetch(year, through, &output, format),
        Commands::Info { year } => info(year),
    }
}

fn fetch(year: u16, through: Option<u16>, output: &PathBuf, format: Format) -> Result<()> {
    let last = through.unwrap_or(year);
    anyhow::ensure!(last >= year, "--through must not precede the starting year");

    let scraper = MatchScraper::new();
    let mut rounds: Vec<Round> = Vec::new();

    for (season, result) in scraper.scrape_many(year..=last) {
        let season_rounds =
            result.with_context(|| format!("Failed to scrape the {} season", season))?;
        println!("{}: {} rounds", season, season_rounds.len());
        rounds.extend(season_rounds);
    }

    match format {
        Format::Csv => export::write_csv(&rounds, output),
        Format::Json => export::write_json(&rounds, output),
    }
    .context("Failed to write output file")?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn info(year: u16) -> Result<()> {
    let rounds = MatchScraper::new()
        .scrape(year)
        .with_context(|| format!("Failed to scrape the {} season", year))?;

    println!("Season {}: {} rounds", year, rounds.len());
    println!();

    for round in &rounds {
        let marker = if round.is_finals() { " [finals]" } else { "" };
        println!("{}{}: {} matches", round, marker, round.matches.len());

        for decoded in &round.matches {
            println!("  {}", decoded);
            if let Some(date) = &decoded.date {
                println!("    Date: {}", date.format("%a %d-%b-%Y %I:%M %p"));
            }
            if let Some(venue) = &decoded.venue {
                println!("    Venue: {}", venue);
            }
            if let Some(attendees) = decoded.attendees {
                println!("    Attendance: {}", attendees);
            }
        }
    }

    Ok(())
}
