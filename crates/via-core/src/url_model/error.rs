//! URL resolution errors.

/// A reference that cannot be resolved against the base URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("invalid URL {url:?}: {source}")]
    Unparseable {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
