//! Boundary search: count a year's movies in O(log pages) requests
//!
//! 1. Probe page 1. No items means the year is empty; otherwise its item
//!    count is the page size for every page but the last.
//! 2. Double the page index while pages keep having items.
//! 3. Binary search between the last page with items and the first without.
//! 4. Re-read the last page for its exact count.
//!
//! Total = `(last - 1) * page_size + tail`. Pages must be full up to the last
//! one and empty after it; a server handing out short pages mid-range would
//! make the total wrong.

use log::debug;

use crate::catalog::{CancelSignal, Catalog, PageResult, Session, Year};
use crate::config::api;
use crate::error::{MovieError, Result};

/// Count every movie of `year`
///
/// Expired tokens are refreshed transparently. Transport or decode failures
/// fail this year only; cancellation returns [`MovieError::Cancelled`].
pub async fn count_for_key<C: Catalog>(
    session: &Session<C>,
    year: Year,
    cancel: &CancelSignal,
) -> Result<u64> {
    BoundarySearch::new(session, year, cancel).run().await
}

struct BoundarySearch<'a, C> {
    session: &'a Session<C>,
    year: Year,
    cancel: &'a CancelSignal,
    requests: usize,
}

impl<'a, C: Catalog> BoundarySearch<'a, C> {
    fn new(session: &'a Session<C>, year: Year, cancel: &'a CancelSignal) -> Self {
        Self {
            session,
            year,
            cancel,
            requests: 0,
        }
    }

    async fn run(mut self) -> Result<u64> {
        let first = self.probe(api::FIRST_PAGE).await?;
        if !first.has_items() {
            debug!(
                "Year {}: page 1 returned status {} with no items",
                self.year, first.status
            );
            return Ok(0);
        }
        let page_size = first.items;

        let (last_page, bound) = self.find_bound(page_size).await?;
        let last_page = self.narrow(last_page, bound, page_size).await?;

        let tail = self.probe(last_page).await?;
        if !tail.has_items() {
            return Err(MovieError::fetch(
                self.year,
                last_page,
                format!(
                    "last page changed while counting (status {}, {} items)",
                    tail.status, tail.items
                ),
            ));
        }

        let total = u64::from(last_page - 1) * page_size as u64 + tail.items as u64;
        debug!(
            "Year {}: {} movies over {} pages of {} ({} requests)",
            self.year, total, last_page, page_size, self.requests
        );
        Ok(total)
    }

    /// Exponential phase: returns `(good, bad)` with items on `good` and none on `bad`
    async fn find_bound(&mut self, page_size: usize) -> Result<(u32, u32)> {
        let mut good = api::FIRST_PAGE;
        loop {
            let next = good.checked_mul(2).ok_or_else(|| {
                MovieError::fetch(self.year, good, "page index overflow while probing")
            })?;
            let result = self.probe(next).await?;
            if !result.has_items() {
                return Ok((good, next));
            }
            good = next;
            if result.items < page_size {
                // A short page is the last one
                return Ok((good, good + 1));
            }
        }
    }

    /// Binary phase: largest page in `[good, bad)` that has items
    async fn narrow(&mut self, mut good: u32, mut bad: u32, page_size: usize) -> Result<u32> {
        while bad - good > 1 {
            let mid = good + (bad - good) / 2;
            let result = self.probe(mid).await?;
            if result.has_items() {
                good = mid;
                if result.items < page_size {
                    break;
                }
            } else {
                bad = mid;
            }
        }
        Ok(good)
    }

    async fn probe(&mut self, page: u32) -> Result<PageResult> {
        self.requests += 1;
        self.session
            .fetch_authorized(self.year, page, self.cancel)
            .await
    }
}
