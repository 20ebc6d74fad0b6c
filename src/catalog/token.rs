//! Bearer token and the swappable cell shared by concurrent searches

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Opaque session credential attached to every page request
///
/// Cloning is cheap; the token text is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Arc<str>);

impl BearerToken {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// The current token of a client run
///
/// Readers get a clone of whole token; writers replace it wholesale. Two
/// tasks refreshing at the same time both succeed and the later write wins.
#[derive(Debug)]
pub struct TokenCell {
    current: RwLock<BearerToken>,
}

impl TokenCell {
    pub fn new(token: BearerToken) -> Self {
        Self {
            current: RwLock::new(token),
        }
    }

    /// Snapshot of the most recent token
    pub fn current(&self) -> BearerToken {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a freshly issued token
    pub fn replace(&self, token: BearerToken) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
