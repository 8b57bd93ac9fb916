use thiserror::Error;

/// A source adapter failure. Any of these leaves the title unresolved
/// for the rest of the process lifetime; callers see it as not-found.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("source returned no passages")]
    Empty,
}

/// Errors returned by the query operations. The command layer renders
/// these into user-facing messages.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("text not found: {0}")]
    NotFound(String),
    #[error("passage {number} out of range (1..={count})")]
    OutOfRange { number: usize, count: usize },
    #[error("no matches")]
    NoMatches,
    /// A fetch failure never partially populates the catalog, so from
    /// the user's point of view the title simply doesn't exist.
    #[error("failed to fetch '{title}'")]
    Fetch {
        title: String,
        #[source]
        source: FetchError,
    },
}
