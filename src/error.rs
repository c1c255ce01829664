//! Error types for the career-stats scraper

use thiserror::Error;

use crate::driver::DriverError;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("page driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("failed to launch browser: {message}")]
    BrowserLaunch { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("slug list {path} contains no player slugs")]
    EmptySlugList { path: String },

    #[error("invalid player slug: {slug:?}")]
    InvalidSlug { slug: String },
}
