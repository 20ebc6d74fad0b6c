//! Movie catalog client module
//!
//! Talks to the catalog's auth and paginated movies endpoints and counts the
//! movies of each requested year.

mod auth;
mod cancel;
mod client;
pub mod fanout;
mod models;
pub mod scan;
pub mod search;
mod session;
mod token;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::Credentials;
pub use cancel::{CancelSignal, CancelSource};
pub use client::CatalogClient;
pub use fanout::{count_year, count_years, CountOptions, YearCounts};
pub use models::{PageResult, PageStatus, Strategy, Year, YearOutcome};
pub use scan::scan_for_key;
pub use search::count_for_key;
pub use session::Session;
pub use token::{BearerToken, TokenCell};
pub use traits::Catalog;
