use thiserror::Error;

/// Failure to load a page through a [`crate::fetch::PageLoader`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("no page for {0}")]
    NotFound(String),
}

/// Errors that abort the processing of a single kernel (or, for the listing
/// page, the whole run).
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A required element is missing from markup assumed to be stable.
    #[error("malformed markup: {0}")]
    Malformed(String),

    /// A table row does not have as many cells as the header.
    #[error("table shape mismatch: {expected} headers but row {row} has {found} cells")]
    ShapeMismatch {
        expected: usize,
        row: usize,
        found: usize,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    pub fn malformed(what: impl Into<String>) -> Self {
        ProfileError::Malformed(what.into())
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
