//! Opaque identifier types
//!
//! Callers are identified by whatever stable id the identity provider
//! issues (an OIDC `sub` claim in practice), so both id types here wrap
//! strings rather than UUIDs. Wrapping keeps user ids and style keys from
//! being swapped at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a caller, as issued by the identity provider.
///
/// The backend treats it as fully opaque: it is the primary key of the
/// caller's credit account and nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId from a provider-issued subject string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Key identifying a style template in the catalog.
///
/// Format: lowercase snake_case with a collection prefix
/// (e.g. "male_buzz_cut", "female_hime_cut"). Keys are only meaningful
/// when they resolve through [`crate::catalog::StyleCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleKey(String);

impl StyleKey {
    /// Create a new StyleKey from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StyleKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
