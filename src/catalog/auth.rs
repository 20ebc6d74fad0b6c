//! Login against the catalog's auth endpoint

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::catalog::{BearerToken, CatalogClient};
use crate::error::{MovieError, Result};

/// Username and password used for every (re-)authentication of a run
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `POST /api/auth`
#[derive(Serialize, Debug)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful login response
#[derive(Deserialize, Debug)]
struct AuthResponse {
    #[serde(default)]
    bearer: Option<String>,
}

impl CatalogClient {
    /// Log in and return a fresh bearer token
    pub async fn login(&self, credentials: &Credentials) -> Result<BearerToken> {
        debug!(
            "Connecting to server at {} with username {}",
            self.base_url(),
            credentials.username
        );

        let body = AuthRequest {
            username: &credentials.username,
            password: &credentials.password,
        };
        let response = self
            .post(&self.auth_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| MovieError::Auth(format!("failed to connect to server: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!("Login failed! Status code: {}, response: {}", status, text);
            return Err(MovieError::Auth(format!(
                "login failed with status {}",
                status.as_u16()
            )));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| MovieError::Auth(format!("malformed auth response: {}", e)))?;

        match auth.bearer.filter(|bearer| !bearer.is_empty()) {
            Some(bearer) => {
                info!("Login successful!");
                Ok(BearerToken::new(bearer))
            }
            None => Err(MovieError::Auth(
                "bearer token not received in auth response".to_string(),
            )),
        }
    }
}
