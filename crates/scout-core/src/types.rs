//! Shared types used across commentscout.
//!
//! This module defines the newtypes that travel between the browser,
//! harvest and CLI crates.

use crate::error::ScoutError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use zeroize::Zeroizing;

/// Host fragment every accepted post URL must contain.
const PLATFORM_HOST_MARKER: &str = "linkedin.com";

/// Path fragments identifying a single post.
const POST_PATH_MARKERS: [&str; 2] = ["/posts/", "/feed/update/"];

/// Check whether a string is a post URL on the supported platform.
///
/// Returns `false` for anything that does not parse as a URL.
#[must_use]
pub fn is_post_url(candidate: &str) -> bool {
    let Ok(parsed) = url::Url::parse(candidate) else {
        return false;
    };

    let host_ok = parsed
        .host_str()
        .is_some_and(|host| host.to_ascii_lowercase().contains(PLATFORM_HOST_MARKER));
    let path = parsed.path();

    host_ok && POST_PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

/// Newtype for a validated post URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostUrl(String);

impl PostUrl {
    /// Create a new `PostUrl` from a string.
    ///
    /// # Errors
    /// Returns [`ScoutError::Validation`] if the URL is not a post URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ScoutError> {
        let url = url.into();
        if is_post_url(&url) {
            Ok(Self(url))
        } else {
            Err(ScoutError::Validation(format!(
                "not a post URL: expected a {PLATFORM_HOST_MARKER} link containing {}, got '{url}'",
                POST_PATH_MARKERS.join(" or ")
            )))
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deduplicated set of email-shaped strings.
///
/// Grows only; entries compare by exact string, so differently cased
/// addresses are kept apart. Iteration is in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSet(BTreeSet<String>);

impl EmailSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one address. Returns `true` if it was not present yet.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        self.0.insert(email.into())
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: EmailSet) {
        self.0.extend(other.0);
    }

    /// Check membership by exact string.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.0.contains(email)
    }

    /// Number of distinct addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Addresses in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for EmailSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for EmailSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for EmailSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Login credential pair.
///
/// The password is wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login name (usually an email address).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password in clear text, for typing into the login form.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
