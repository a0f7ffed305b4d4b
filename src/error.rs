use std::time::Duration;
use thiserror::Error;

/// Errors raised while scraping a tag page
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page did not expose `ytInitialData` (layout change or blocked content)
    #[error("ytInitialData not found on the page")]
    MissingPageState,

    /// No WebDriver session could be created
    #[error("failed to start a browser session at {url}: {reason}")]
    Connect { url: String, reason: String },

    /// A browser command failed
    #[error("browser command `{command}` failed: {reason}")]
    Command {
        command: &'static str,
        reason: String,
    },

    /// A bounded wait expired
    #[error("timed out after {waited:?} waiting for {condition}")]
    Timeout {
        waited: Duration,
        condition: &'static str,
    },

    /// The tag was empty once its leading markers were stripped
    #[error("invalid tag: {0:?}")]
    InvalidTag(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ScrapeError {
    /// Wraps any displayable browser failure as a command error
    pub fn command(command: &'static str, error: impl std::fmt::Display) -> Self {
        ScrapeError::Command {
            command,
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
