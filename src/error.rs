use std::fmt;

use crate::catalog::Year;

/// Custom error type for catalog operations
#[derive(Debug)]
pub enum MovieError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Login rejected, unreachable, or answered without a token
    Auth(String),
    /// Counting a year failed on a specific page
    Fetch {
        year: Year,
        page: u32,
        message: String,
    },
    /// JSON parsing error
    Json(String),
    /// Operation was cancelled before it finished (not a failure)
    Cancelled,
    /// A background task died before reporting
    Task(String),
}

impl MovieError {
    /// Wrap any error as a fetch failure for `year` at `page`
    pub fn fetch(year: Year, page: u32, err: impl fmt::Display) -> Self {
        MovieError::Fetch {
            year,
            page,
            message: err.to_string(),
        }
    }

    /// True for the cancellation outcome
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MovieError::Cancelled)
    }
}

impl fmt::Display for MovieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieError::Http(e) => write!(f, "HTTP request failed: {}", e),
            MovieError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            MovieError::Fetch {
                year,
                page,
                message,
            } => write!(
                f,
                "Failed to fetch page {} for year {}: {}",
                page, year, message
            ),
            MovieError::Json(msg) => write!(f, "JSON error: {}", msg),
            MovieError::Cancelled => write!(f, "Operation cancelled"),
            MovieError::Task(msg) => write!(f, "Background task failed: {}", msg),
        }
    }
}

impl std::error::Error for MovieError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MovieError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MovieError {
    fn from(err: reqwest::Error) -> Self {
        MovieError::Http(err)
    }
}

impl From<serde_json::Error> for MovieError {
    fn from(err: serde_json::Error) -> Self {
        MovieError::Json(err.to_string())
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, MovieError>;
