//! Worker-pool scan: the brute-force alternative to boundary search
//!
//! Workers pull page indices from a shared counter and stop at the first page
//! that is empty or not OK. Costs at least one request per page plus
//! overshoot, but does not rely on pages being full up to the last one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::join_all;
use log::debug;

use crate::catalog::{BearerToken, CancelSignal, Catalog, PageStatus, Session, Year};
use crate::config::api;
use crate::error::{MovieError, Result};

/// Count every movie of `year` by walking all pages with `workers` in flight
pub async fn scan_for_key<C: Catalog>(
    session: &Session<C>,
    year: Year,
    workers: usize,
    cancel: &CancelSignal,
) -> Result<u64> {
    let workers = workers.max(1);
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    let mut start = api::FIRST_PAGE;
    let mut last_rejected: Option<u32> = None;

    loop {
        let round = ScanRound::new(start);
        let token = session.token();
        let results = join_all(
            (0..workers).map(|_| round.worker(session.catalog(), year, &token, cancel)),
        )
        .await;

        if cancel.is_cancelled() {
            return Err(MovieError::Cancelled);
        }
        for result in results {
            result?;
        }

        counts.extend(round.take_counts());
        let end = round.end.load(Ordering::SeqCst);
        let rejected = round.rejected.load(Ordering::SeqCst);

        if rejected != u32::MAX && rejected == end {
            if last_rejected == Some(rejected) {
                return Err(MovieError::fetch(
                    year,
                    rejected,
                    "token rejected again right after re-authentication",
                ));
            }
            debug!(
                "Year {}: page {} rejected the token, resuming scan there",
                year, rejected
            );
            session.reauthenticate().await.map_err(|e| {
                MovieError::fetch(year, rejected, format!("re-authentication failed: {}", e))
            })?;
            last_rejected = Some(rejected);
            start = rejected;
            continue;
        }

        let total: u64 = counts
            .range(..end)
            .map(|(_, items)| *items as u64)
            .sum();
        debug!("Year {}: scan ended at page {}, {} movies", year, end, total);
        return Ok(total);
    }
}

/// Shared state of one pass over the pages
struct ScanRound {
    next: AtomicU32,
    /// Lowest page seen empty, not OK, or rejected
    end: AtomicU32,
    /// Lowest page that answered 401
    rejected: AtomicU32,
    counts: Mutex<BTreeMap<u32, usize>>,
}

impl ScanRound {
    fn new(start: u32) -> Self {
        Self {
            next: AtomicU32::new(start),
            end: AtomicU32::new(u32::MAX),
            rejected: AtomicU32::new(u32::MAX),
            counts: Mutex::new(BTreeMap::new()),
        }
    }

    fn take_counts(&self) -> BTreeMap<u32, usize> {
        std::mem::take(&mut *self.counts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    async fn worker<C: Catalog>(
        &self,
        catalog: &C,
        year: Year,
        token: &BearerToken,
        cancel: &CancelSignal,
    ) -> Result<()> {
        loop {
            let page = self.next.fetch_add(1, Ordering::SeqCst);
            if page >= self.end.load(Ordering::SeqCst) || cancel.is_cancelled() {
                return Ok(());
            }

            let result = match catalog.fetch_page(year, page, token, cancel).await {
                Ok(result) => result,
                Err(e) => {
                    // Siblings stop at the failed page
                    self.end.fetch_min(page, Ordering::SeqCst);
                    return Err(MovieError::fetch(year, page, e));
                }
            };

            match result.status {
                PageStatus::Cancelled => return Ok(()),
                PageStatus::Unauthorized => {
                    self.rejected.fetch_min(page, Ordering::SeqCst);
                    self.end.fetch_min(page, Ordering::SeqCst);
                    return Ok(());
                }
                _ if result.has_items() => {
                    self.counts
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .insert(page, result.items);
                }
                _ => {
                    self.end.fetch_min(page, Ordering::SeqCst);
                    return Ok(());
                }
            }
        }
    }
}
