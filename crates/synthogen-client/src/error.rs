use thiserror::Error;

/// Errors surfaced by the Synthogen client.
///
/// Every foreign-boundary failure is converted into one of these before it
/// reaches the caller; no native error representation crosses this line.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the library resolution strategies produced a loadable engine.
    /// Fatal for the call, but not cached: the next call retries loading.
    #[error("native engine unavailable: {0}")]
    LibraryUnavailable(String),
    /// The engine rejected the schema or failed mid-generation. Carries the
    /// native diagnostic message.
    #[error("generation failed: {0}")]
    Generation(String),
    /// Schema serialization or result deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;
