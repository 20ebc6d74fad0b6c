//! Authenticated session shared by every search of a run

use std::sync::Arc;

use log::{debug, info};

use crate::catalog::{
    BearerToken, CancelSignal, Catalog, Credentials, PageResult, PageStatus, TokenCell, Year,
};
use crate::error::{MovieError, Result};

/// Catalog handle, login credentials and the current token
///
/// Cheap to clone into spawned tasks; every clone shares the same token cell.
pub struct Session<C> {
    catalog: Arc<C>,
    credentials: Arc<Credentials>,
    tokens: Arc<TokenCell>,
}

impl<C> Clone for Session<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            credentials: Arc::clone(&self.credentials),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<C: Catalog> Session<C> {
    /// Log in and start a session; a rejected login is fatal to the run
    pub async fn login(catalog: Arc<C>, credentials: Credentials) -> Result<Self> {
        let token = catalog.authenticate(&credentials).await?;
        Ok(Self::with_token(catalog, credentials, token))
    }

    /// Start a session from an already issued token
    pub fn with_token(catalog: Arc<C>, credentials: Credentials, token: BearerToken) -> Self {
        Self {
            catalog,
            credentials: Arc::new(credentials),
            tokens: Arc::new(TokenCell::new(token)),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The most recent token
    pub fn token(&self) -> BearerToken {
        self.tokens.current()
    }

    /// Log in again and publish the new token to every task of the run
    pub async fn reauthenticate(&self) -> Result<BearerToken> {
        info!("Session expired, re-authenticating...");
        let token = self.catalog.authenticate(&self.credentials).await?;
        self.tokens.replace(token.clone());
        Ok(token)
    }

    /// Fetch a page with the current token, re-authenticating once on 401
    ///
    /// The page that hit the 401 is fetched again with the new token, so it is
    /// never skipped. A second 401 or a failed re-login is a fetch error for
    /// this year; a cancelled page comes back as [`MovieError::Cancelled`].
    pub async fn fetch_authorized(
        &self,
        year: Year,
        page: u32,
        cancel: &CancelSignal,
    ) -> Result<PageResult> {
        let token = self.tokens.current();
        let first = self.fetch_once(year, page, &token, cancel).await?;
        if first.status != PageStatus::Unauthorized {
            return Ok(first);
        }

        debug!("Page {} for year {} rejected the token", page, year);
        let token = self.reauthenticate().await.map_err(|e| {
            MovieError::fetch(year, page, format!("re-authentication failed: {}", e))
        })?;
        if cancel.is_cancelled() {
            return Err(MovieError::Cancelled);
        }

        let retry = self.fetch_once(year, page, &token, cancel).await?;
        if retry.status == PageStatus::Unauthorized {
            return Err(MovieError::fetch(
                year,
                page,
                "token rejected again right after re-authentication",
            ));
        }
        Ok(retry)
    }

    async fn fetch_once(
        &self,
        year: Year,
        page: u32,
        token: &BearerToken,
        cancel: &CancelSignal,
    ) -> Result<PageResult> {
        let result = self
            .catalog
            .fetch_page(year, page, token, cancel)
            .await
            .map_err(|e| MovieError::fetch(year, page, e))?;
        if result.status == PageStatus::Cancelled {
            return Err(MovieError::Cancelled);
        }
        Ok(result)
    }
}
