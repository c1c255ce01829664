//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(name = "sofa-career", about = "Season-by-season career stats scraper")]
pub struct SofaCareer {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scrape career stats for every player slug in a list file.
    ///
    /// Reads newline-delimited slugs, drives the site's category → league →
    /// tab hierarchy per player, and writes one reconciled row per
    /// (season, league, category).
    Scrape {
        /// Newline-delimited slug list, as produced by the discovery crawl.
        #[clap(long, short)]
        input: PathBuf,

        /// Output file path.
        #[clap(long, short, default_value = "output/career_stats.csv")]
        output: PathBuf,

        /// Write JSON instead of CSV.
        #[clap(long)]
        json: bool,

        /// Process at most this many slugs from the list.
        #[clap(long)]
        limit: Option<usize>,

        /// Run the browser with a visible window.
        #[clap(long)]
        headed: bool,

        /// Print per-step status lines and every recorded skip.
        #[clap(long, short)]
        verbose: bool,
    },

    /// Print the output header row (identity columns plus all stat headers).
    Columns,
}
