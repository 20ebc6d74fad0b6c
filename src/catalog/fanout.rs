//! Fan-out: one counting task per requested year

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info};
use tokio::sync::Mutex;

use crate::catalog::{
    count_for_key, scan_for_key, CancelSignal, Catalog, Session, Strategy, Year, YearOutcome,
};
use crate::config::scan;
use crate::error::{MovieError, Result};

/// How each year is counted
#[derive(Debug, Clone, Copy)]
pub struct CountOptions {
    pub strategy: Strategy,
    /// Concurrent page workers per year (scan strategy only)
    pub workers: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Boundary,
            workers: scan::DEFAULT_WORKERS,
        }
    }
}

/// Outcome of every requested year, keyed by year
#[derive(Debug, Default)]
pub struct YearCounts {
    outcomes: HashMap<Year, YearOutcome>,
}

impl YearCounts {
    pub fn insert(&mut self, year: Year, outcome: YearOutcome) {
        self.outcomes.insert(year, outcome);
    }

    fn get(&self, year: Year) -> Option<&YearOutcome> {
        self.outcomes.get(&year)
    }

    /// Movie count for `year`, if it was counted
    pub fn count(&self, year: Year) -> Option<u64> {
        self.get(year).and_then(YearOutcome::count)
    }

    /// Successfully counted years only
    pub fn counts(&self) -> HashMap<Year, u64> {
        self.outcomes
            .iter()
            .filter_map(|(year, outcome)| outcome.count().map(|total| (*year, total)))
            .collect()
    }

    /// Number of distinct years counted
    pub fn counted(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| outcome.count().is_some())
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (Year, &MovieError)> {
        self.outcomes.iter().filter_map(|(year, outcome)| match outcome {
            YearOutcome::Failed(e) => Some((*year, e)),
            _ => None,
        })
    }

    pub fn cancelled(&self) -> impl Iterator<Item = Year> + '_ {
        self.outcomes.iter().filter_map(|(year, outcome)| match outcome {
            YearOutcome::Cancelled => Some(*year),
            _ => None,
        })
    }

}

/// Count one year with the chosen strategy
pub async fn count_year<C: Catalog>(
    session: &Session<C>,
    year: Year,
    options: CountOptions,
    cancel: &CancelSignal,
) -> Result<u64> {
    match options.strategy {
        Strategy::Boundary => count_for_key(session, year, cancel).await,
        Strategy::Scan => scan_for_key(session, year, options.workers, cancel).await,
    }
}

/// Count all `years` concurrently, one spawned task each
///
/// Waits for every task. A failed or cancelled year never affects its
/// siblings. Duplicate years are counted independently; the one finishing
/// last is kept.
pub async fn count_years<C: Catalog + 'static>(
    session: &Session<C>,
    years: &[Year],
    options: CountOptions,
    cancel: &CancelSignal,
) -> YearCounts {
    let results = Arc::new(Mutex::new(YearCounts::default()));

    let handles = years.iter().map(|&year| {
        let session = session.clone();
        let cancel = cancel.clone();
        let results = Arc::clone(&results);
        tokio::spawn(async move {
            let outcome =
                YearOutcome::from_result(count_year(&session, year, options, &cancel).await);
            match &outcome {
                YearOutcome::Counted(total) => debug!("Year {}: {} movies", year, total),
                YearOutcome::Failed(e) => debug!("Failed to fetch movies for year {}: {}", year, e),
                YearOutcome::Cancelled => info!("Counting year {} was cancelled", year),
            }
            results.lock().await.insert(year, outcome);
        })
    });

    let joined = join_all(handles).await;
    let mut results = results.lock().await;
    for (year, joined) in years.iter().zip(joined) {
        if let Err(e) = joined {
            debug!("Task counting year {} died: {}", year, e);
            results.insert(*year, YearOutcome::Failed(MovieError::Task(e.to_string())));
        }
    }

    std::mem::take(&mut *results)
}
