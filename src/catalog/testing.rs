//! In-memory catalog for exercising the counting algorithms

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{
    BearerToken, CancelSignal, Catalog, Credentials, PageResult, PageStatus, Year,
};
use crate::error::{MovieError, Result};

/// Serves `totals[year]` movies at `page_size` per page
///
/// Tokens are `token-N`; a login issues the next N. Revoking at fetch index
/// `i` invalidates every token issued so far just before answering fetch `i`.
pub(crate) struct SimulatedCatalog {
    page_size: u64,
    totals: HashMap<Year, u64>,
    past_end_status: u16,
    first_page_status: Option<u16>,
    broken_year: Option<Year>,
    broken_pages: Vec<(Year, u32)>,
    shrinking_page: Option<(u32, usize)>,
    revoke_at: Vec<usize>,
    reject_all_tokens: bool,
    reject_logins: bool,
    delay: Option<Duration>,
    fetches: AtomicUsize,
    auths: AtomicUsize,
    generation: AtomicUsize,
    min_valid: AtomicUsize,
    requested: Mutex<Vec<(Year, u32)>>,
}

impl SimulatedCatalog {
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size,
            totals: HashMap::new(),
            past_end_status: 200,
            first_page_status: None,
            broken_year: None,
            broken_pages: Vec::new(),
            shrinking_page: None,
            revoke_at: Vec::new(),
            reject_all_tokens: false,
            reject_logins: false,
            delay: None,
            fetches: AtomicUsize::new(0),
            auths: AtomicUsize::new(0),
            generation: AtomicUsize::new(0),
            min_valid: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Token valid before any login happened
    pub fn initial_token() -> BearerToken {
        BearerToken::new("token-0")
    }

    pub fn with_year(mut self, year: Year, total: u64) -> Self {
        self.totals.insert(year, total);
        self
    }

    /// Status returned for pages past the last one (200 means an empty array)
    pub fn with_past_end_status(mut self, status: u16) -> Self {
        self.past_end_status = status;
        self
    }

    pub fn with_first_page_status(mut self, status: u16) -> Self {
        self.first_page_status = Some(status);
        self
    }

    /// Every page of `year` fails to decode
    pub fn with_broken_year(mut self, year: Year) -> Self {
        self.broken_year = Some(year);
        self
    }

    /// One page of `year` fails to decode
    pub fn with_broken_page(mut self, year: Year, page: u32) -> Self {
        self.broken_pages.push((year, page));
        self
    }

    /// `page` answers 404 once it has been read `reads` times
    pub fn shrinking_page_after(mut self, page: u32, reads: usize) -> Self {
        self.shrinking_page = Some((page, reads));
        self
    }

    pub fn revoking_token_at(mut self, fetch_index: usize) -> Self {
        self.revoke_at.push(fetch_index);
        self
    }

    pub fn rejecting_all_tokens(mut self) -> Self {
        self.reject_all_tokens = true;
        self
    }

    pub fn rejecting_logins(mut self) -> Self {
        self.reject_logins = true;
        self
    }

    /// Every page takes `delay` to answer
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn auth_count(&self) -> usize {
        self.auths.load(Ordering::SeqCst)
    }

    /// Pages requested for `year`, in request order
    pub fn requested_pages(&self, year: Year) -> Vec<u32> {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter(|(y, _)| *y == year)
            .map(|(_, page)| *page)
            .collect()
    }

    fn items_on(&self, year: Year, page: u32) -> usize {
        let total = self.totals.get(&year).copied().unwrap_or(0);
        let before = (u64::from(page) - 1) * self.page_size;
        total.saturating_sub(before).min(self.page_size) as usize
    }

    fn token_is_valid(&self, token: &BearerToken) -> bool {
        token
            .as_str()
            .strip_prefix("token-")
            .and_then(|n| n.parse::<usize>().ok())
            .is_some_and(|n| n >= self.min_valid.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl Catalog for SimulatedCatalog {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<BearerToken> {
        self.auths.fetch_add(1, Ordering::SeqCst);
        if self.reject_logins {
            return Err(MovieError::Auth("login failed with status 401".to_string()));
        }
        let n = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(BearerToken::new(format!("token-{}", n)))
    }

    async fn fetch_page(
        &self,
        year: Year,
        page: u32,
        token: &BearerToken,
        cancel: &CancelSignal,
    ) -> Result<PageResult> {
        if let Some(delay) = self.delay {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(PageResult::cancelled()),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let index = self.fetches.fetch_add(1, Ordering::SeqCst);
        let reads = {
            let mut requested = self.requested.lock().unwrap();
            requested.push((year, page));
            requested.iter().filter(|(_, p)| *p == page).count()
        };

        if self.revoke_at.contains(&index) {
            let newest = self.generation.load(Ordering::SeqCst);
            self.min_valid.store(newest + 1, Ordering::SeqCst);
        }
        if self.reject_all_tokens || !self.token_is_valid(token) {
            return Ok(PageResult::status(PageStatus::Unauthorized));
        }
        if self.broken_year == Some(year) || self.broken_pages.contains(&(year, page)) {
            return Err(MovieError::Json("expected a JSON array".to_string()));
        }
        if let Some((shrinking, limit)) = self.shrinking_page {
            if shrinking == page && reads > limit {
                return Ok(PageResult::status(PageStatus::Other(404)));
            }
        }
        if page == 1 {
            if let Some(code) = self.first_page_status {
                return Ok(PageResult::status(PageStatus::from_code(code)));
            }
        }

        let items = self.items_on(year, page);
        if items == 0 && self.past_end_status != 200 {
            return Ok(PageResult::status(PageStatus::from_code(
                self.past_end_status,
            )));
        }
        Ok(PageResult::ok(items))
    }
}
