//! Error types for the PokeAPI client.
//!
//! # Design
//! Only failures that leave the caller without a usable HTTP response are
//! errors. A 4xx/5xx status is a normal `ApiResponse::Failure` value, not an
//! `ApiError`. What remains is the transport failing outright, or a 2xx body
//! that does not decode.

/// Boxed error from a transport backend (ureq, reqwest, ...).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `PokeApiClient` parse methods and the transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No HTTP response was obtained: DNS, connect, timeout, I/O, bad URL.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered 2xx but the body is not the expected JSON.
    #[error("failed to decode HTTP {status} response body: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ApiError::Transport(err.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode { .. })
    }
}
