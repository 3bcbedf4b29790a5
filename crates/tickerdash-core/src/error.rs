use thiserror::Error;

/// Local input errors raised before any request is dispatched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one filter (action or rating) is required")]
    MissingFilter,
    #[error("search query cannot be empty")]
    EmptySearchQuery,
    #[error("identifier cannot be empty")]
    EmptyIdentifier,
    #[error(
        "invalid sort field '{value}', expected one of id, ticker, target_from, target_to, \
company, action, brokerage, rating_from, rating_to, time, created_at, updated_at"
    )]
    InvalidSortField { value: String },
    #[error("invalid sort order '{value}', expected asc or desc")]
    InvalidSortOrder { value: String },
}

/// Normalized transport failure.
///
/// Every failure the transport sees (no response, error status, undecodable body)
/// is folded into this shape before it reaches a caller. `status` is `None` when
/// no response was received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<u16>,
}

impl ApiError {
    pub const FALLBACK_MESSAGE: &'static str = "Request failed";

    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Error for a request that never produced a response.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Top-level error type for resource access calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CoreError {
    /// HTTP status of the underlying response, when one was received.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => None,
            Self::Api(error) => error.status(),
        }
    }

    /// Display string for store error state, or `fallback` when the error carries none.
    pub fn display_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_owned()
        } else {
            message
        }
    }
}
