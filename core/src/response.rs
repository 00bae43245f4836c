//! Outcome of a completed HTTP exchange.
//!
//! # Design
//! `ApiResponse` is only produced once the server has answered. A non-2xx
//! status is data the caller inspects, carried in `Failure` together with
//! the raw body. Transport and decode failures never reach this type; they
//! are `ApiError`s.

/// A decoded success or an HTTP error status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// 2xx status with a body that decoded into `T`.
    Success { status: u16, body: T },

    /// Any non-2xx status. `body` is the raw response text, never decoded.
    Failure { status: u16, body: String },
}

impl<T> ApiResponse<T> {
    pub fn is_successful(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    /// The HTTP status code, passed through unmodified.
    pub fn code(&self) -> u16 {
        match self {
            ApiResponse::Success { status, .. } | ApiResponse::Failure { status, .. } => *status,
        }
    }

    pub fn body(&self) -> Option<&T> {
        match self {
            ApiResponse::Success { body, .. } => Some(body),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn into_body(self) -> Option<T> {
        match self {
            ApiResponse::Success { body, .. } => Some(body),
            ApiResponse::Failure { .. } => None,
        }
    }

    /// Raw body of an HTTP error response.
    pub fn error_body(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { .. } => None,
            ApiResponse::Failure { body, .. } => Some(body),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Success { status, body } => ApiResponse::Success {
                status,
                body: f(body),
            },
            ApiResponse::Failure { status, body } => ApiResponse::Failure { status, body },
        }
    }
}
