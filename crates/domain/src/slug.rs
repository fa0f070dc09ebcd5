//! Slug — the string identifier every model object is addressed by.
//!
//! Slugs come straight from the declarative input; they are never generated.
//! Two values are reserved: [`ROOT_DOMAIN`] names the root domain and
//! [`DOMAIN_ONLY_ENTITY`] is the sentinel entity marking a binding that
//! addresses its domain as a whole rather than a specific entity.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved slug of the root domain.
pub const ROOT_DOMAIN: &str = "root";

/// Reserved sentinel entity slug marking a domain-only binding.
pub const DOMAIN_ONLY_ENTITY: &str = "_";

/// A library-scoped string identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Wrap a raw string as a slug.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this slug names the reserved root domain.
    #[must_use]
    pub fn is_root_domain(&self) -> bool {
        self.0 == ROOT_DOMAIN
    }

    /// Whether this slug is the reserved domain-only entity sentinel.
    #[must_use]
    pub fn is_domain_only_entity(&self) -> bool {
        self.0 == DOMAIN_ONLY_ENTITY
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Slug {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Slug {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}
