//! The seam between the counting algorithms and the network

use async_trait::async_trait;

use crate::catalog::{BearerToken, CancelSignal, Credentials, PageResult, Year};
use crate::error::Result;

/// A paginated, token-protected movie catalog
///
/// [`CatalogClient`](crate::catalog::CatalogClient) talks HTTP; tests plug in
/// an in-memory catalog to count requests and inject failures.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Exchange credentials for a fresh bearer token (one round trip)
    ///
    /// Safe to call concurrently; every call yields an independent token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<BearerToken>;

    /// Fetch a single page of movies for `year`, without retrying
    ///
    /// A 401 is reported as [`PageStatus::Unauthorized`](crate::catalog::PageStatus),
    /// not as an error. If `cancel` fires first the request is aborted and a
    /// cancelled page is returned.
    async fn fetch_page(
        &self,
        year: Year,
        page: u32,
        token: &BearerToken,
        cancel: &CancelSignal,
    ) -> Result<PageResult>;
}
