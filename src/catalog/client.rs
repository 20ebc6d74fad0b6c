//! Catalog HTTP client

use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::IgnoredAny;

use crate::catalog::{
    BearerToken, CancelSignal, Catalog, Credentials, PageResult, PageStatus, Year,
};
use crate::config::{api, http};
use crate::error::Result;

/// HTTP client for the movie catalog
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for `server:port` with pooled connections
    ///
    /// `server` may be a bare host (`localhost`) or carry a scheme
    /// (`https://movies.example.com`); plain HTTP is assumed otherwise.
    pub fn new(server: &str, port: u16) -> Self {
        Self::with_base_url(&Self::build_base_url(server, port))
    }

    /// Create a client against an explicit base URL (mock servers, proxies)
    pub fn with_base_url(base_url: &str) -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(http::POOL_MAX_IDLE_PER_HOST)
            .connect_timeout(http::CONNECT_TIMEOUT)
            .timeout(http::REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_base_url(server: &str, port: u16) -> String {
        let server = server.trim_end_matches('/');
        if server.starts_with("http://") || server.starts_with("https://") {
            format!("{}:{}", server, port)
        } else {
            format!("http://{}:{}", server, port)
        }
    }

    /// Base URL all endpoints hang off
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn auth_url(&self) -> String {
        format!("{}{}", self.base_url, api::AUTH_PATH)
    }

    pub(crate) fn page_url(&self, year: Year, page: u32) -> String {
        format!("{}{}/{}/{}", self.base_url, api::MOVIES_PATH, year, page)
    }

    /// Create a POST request builder
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.post(url)
    }

    /// Fetch one page and count its movies
    ///
    /// Only a 200 body is decoded. The body must be a JSON array; anything
    /// else is an error rather than an empty page.
    pub async fn fetch_movies_page(
        &self,
        year: Year,
        page: u32,
        token: &BearerToken,
        cancel: &CancelSignal,
    ) -> Result<PageResult> {
        let url = self.page_url(year, page);
        let request = self
            .client
            .get(&url)
            .header(AUTHORIZATION, token.header_value())
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Fetching page {} for year {}: cancelled", page, year);
                return Ok(PageResult::cancelled());
            }
            response = request => response?,
        };

        let code = response.status().as_u16();
        debug!(
            "Fetching page {} for year {}: status code {}",
            page, year, code
        );

        let status = PageStatus::from_code(code);
        if status != PageStatus::Ok {
            return Ok(PageResult::status(status));
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(PageResult::cancelled()),
            body = response.bytes() => body?,
        };
        let movies: Vec<IgnoredAny> = serde_json::from_slice(&body)?;

        Ok(PageResult::ok(movies.len()))
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<BearerToken> {
        self.login(credentials).await
    }

    async fn fetch_page(
        &self,
        year: Year,
        page: u32,
        token: &BearerToken,
        cancel: &CancelSignal,
    ) -> Result<PageResult> {
        self.fetch_movies_page(year, page, token, cancel).await
    }
}
