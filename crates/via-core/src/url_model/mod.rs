//! URL normalization.
//!
//! Classifies URLs by scheme and resolves arbitrary references (absolute,
//! relative, protocol-relative, empty) against the page's base URL.

mod encode;
mod error;

pub use encode::encode_uri_component;
pub use error::UrlError;

use url::Url;

/// Schemes eligible for proxying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Scheme of `url` by literal, case-sensitive prefix match.
///
/// Anything that does not start with `https:` or `http:` (including
/// `HTTP:`, `//host` and relative paths) yields `None`.
pub fn scheme(url: &str) -> Option<Scheme> {
    if url.starts_with("https:") {
        Some(Scheme::Https)
    } else if url.starts_with("http:") {
        Some(Scheme::Http)
    } else {
        None
    }
}

/// Resolve `url` against `base` into an absolute URL string.
///
/// Protocol-relative references (`//host/path`) inherit the base scheme by
/// plain concatenation. Everything else goes through standard relative URL
/// resolution, so already absolute URLs come back normalized (e.g. a bare
/// origin gains its trailing slash).
pub fn make_absolute(url: &str, base: &Url) -> Result<String, UrlError> {
    if url.starts_with("//") {
        return Ok(format!("{}:{}", base.scheme(), url));
    }

    base.join(url)
        .map(String::from)
        .map_err(|source| UrlError::Unparseable {
            url: url.to_string(),
            source,
        })
}
