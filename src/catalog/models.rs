//! Shared types for page fetching and per-year results

use clap::ValueEnum;

use crate::error::MovieError;

/// Filter key: the release year a catalog query is scoped to
pub type Year = i32;

/// HTTP outcome of a single page request, as far as counting cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// 200 with a decoded body
    Ok,
    /// 401, the token has expired
    Unauthorized,
    /// Any other status code
    Other(u16),
    /// The caller cancelled before the response arrived
    Cancelled,
}

impl PageStatus {
    /// Map a raw status code to a page status
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => PageStatus::Ok,
            401 => PageStatus::Unauthorized,
            other => PageStatus::Other(other),
        }
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageStatus::Ok => write!(f, "200"),
            PageStatus::Unauthorized => write!(f, "401"),
            PageStatus::Other(code) => write!(f, "{}", code),
            PageStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of one page fetch
///
/// `items` is only meaningful when `status` is [`PageStatus::Ok`]. Transport
/// and decode failures are reported as errors by the fetcher, never as a
/// zero-item page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageResult {
    pub items: usize,
    pub status: PageStatus,
}

impl PageResult {
    pub fn ok(items: usize) -> Self {
        Self {
            items,
            status: PageStatus::Ok,
        }
    }

    pub fn status(status: PageStatus) -> Self {
        Self { items: 0, status }
    }

    pub fn cancelled() -> Self {
        Self::status(PageStatus::Cancelled)
    }

    /// The page exists and holds at least one item
    pub fn has_items(&self) -> bool {
        self.status == PageStatus::Ok && self.items > 0
    }
}

/// How pages are discovered for a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Strategy {
    /// Exponential probe then binary search for the last page (default)
    #[default]
    Boundary,
    /// Concurrent worker pool walking every page until the end
    Scan,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Boundary => write!(f, "boundary"),
            Strategy::Scan => write!(f, "scan"),
        }
    }
}

/// Final result for one requested year
#[derive(Debug)]
pub enum YearOutcome {
    /// Total number of movies in the year
    Counted(u64),
    /// Counting failed; sibling years are unaffected
    Failed(MovieError),
    /// Counting was cancelled before it finished
    Cancelled,
}

impl YearOutcome {
    /// Build an outcome from a search result, keeping cancellation apart from failure
    pub fn from_result(result: crate::error::Result<u64>) -> Self {
        match result {
            Ok(total) => YearOutcome::Counted(total),
            Err(e) if e.is_cancelled() => YearOutcome::Cancelled,
            Err(e) => YearOutcome::Failed(e),
        }
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            YearOutcome::Counted(total) => Some(*total),
            _ => None,
        }
    }
}
