use thiserror::Error;

/// Failure to load a word list or the category index.
///
/// A failed load is never the same thing as an empty list: callers treat the
/// affected category as unavailable and may retry on the next attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no word list at {what}")]
    NotFound { what: String },

    #[error("malformed word list {what}: {source}")]
    Malformed {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch {what}")]
    Fetch { what: String },
}

impl LoadError {
    pub fn not_found(what: impl Into<String>) -> Self {
        LoadError::NotFound { what: what.into() }
    }
}
