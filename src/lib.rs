//! moviectl - Count movies per year in a paginated movie catalog
//!
//! A CLI client for a bearer-token protected movie catalog whose only
//! listing endpoint is `/api/movies/{year}/{page}`.
//!
//! # Features
//!
//! - Exact per-year totals in O(log pages) requests (boundary search)
//! - Transparent re-authentication when the session token expires
//! - All requested years counted in parallel; one failing year never
//!   affects the others
//! - Opt-in worker-pool scan for servers without the "empty after the end"
//!   guarantee
//! - Multiple output formats (text, table, JSON)
//!
//! # Example
//!
//! ```bash
//! # Count movies for two years
//! moviectl -s localhost -u username -p password -Y 1950 -Y 2020
//!
//! # Verbose logging, JSON output
//! moviectl -s localhost -u username -p password -Y 1930 -v -o json
//!
//! # Brute-force scan with 50 workers per year
//! moviectl -s localhost -u username -p password -Y 1930 --strategy scan --workers 50
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod ui;

pub use catalog::{
    count_for_key, count_years, scan_for_key, BearerToken, CancelSignal, CancelSource, Catalog,
    CatalogClient, CountOptions, Credentials, PageResult, PageStatus, Session, Strategy, Year,
    YearCounts, YearOutcome,
};
pub use cli::{Cli, OutputFormat};
pub use error::{MovieError, Result};
pub use output::{output_year_counts, report_failures, YearRow};
