use std::path::PathBuf;
use thiserror::Error;

/// Failure raised by the transport client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The remote answered with a non-2xx status.
    #[error("API error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    /// The request could not be sent at all (network failure, bad host).
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Failure while producing the static fallback wedding.
#[derive(Error, Debug)]
pub enum MockDataError {
    #[error("Failed to read mock wedding fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse mock wedding fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A consumer asked for a store that was never provided.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{consumer} must be used within {provider}")]
    MissingProvider {
        consumer: &'static str,
        provider: &'static str,
    },
}

/// A failed remote call that was absorbed locally.
///
/// `value` is still usable: callers that don't care about the cause can
/// settle the result with [`settle`].
#[derive(Debug, Clone)]
pub struct Recovered<T> {
    pub value: T,
    pub cause: TransportError,
}

impl<T> Recovered<T> {
    pub fn new(value: T, cause: TransportError) -> Self {
        Self { value, cause }
    }
}

/// Collapses a recoverable result into its usable value.
pub fn settle<T>(result: Result<T, Recovered<T>>) -> T {
    match result {
        Ok(value) => value,
        Err(recovered) => recovered.value,
    }
}

pub type TransportResult<T> = Result<T, TransportError>;
