//! Error types for the market dashboard pipeline

use crate::types::Widget;
use thiserror::Error;

/// Errors raised while retrieving a raw payload from the market data API
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider API error (non-success HTTP status)
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Response body was not valid JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::NetworkError(err)
        }
    }
}

/// A raw payload is missing a required field or carries a value of the wrong shape
///
/// `field` is the JSON path of the offending value, e.g. `coins[1].item.data.price`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent or null
    #[error("missing field `{field}`")]
    Missing { field: String },

    /// Field present with an unexpected JSON type
    #[error("field `{field}` is not {expected}")]
    Mistyped {
        field: String,
        expected: &'static str,
    },

    /// Field present and well-typed but violates a record invariant
    #[error("field `{field}` is out of range: {reason}")]
    OutOfRange { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Missing error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a Mistyped error
    pub fn mistyped(field: impl Into<String>, expected: &'static str) -> Self {
        Self::Mistyped {
            field: field.into(),
            expected,
        }
    }

    /// Creates an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// JSON path of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } => field,
            Self::Mistyped { field, .. } => field,
            Self::OutOfRange { field, .. } => field,
        }
    }
}

/// A widget could not be rendered
///
/// This is the only error the HTTP layer sees. It maps every variant to a
/// generic server error using [`Widget::unavailable_message`].
#[derive(Debug, Error)]
pub enum DataUnavailable {
    /// The gateway could not supply a payload
    #[error("{widget} unavailable: {source}")]
    Transport {
        widget: Widget,
        #[source]
        source: TransportError,
    },

    /// The payload failed normalization
    #[error("{widget} unavailable: {source}")]
    Validation {
        widget: Widget,
        #[source]
        source: ValidationError,
    },
}

impl DataUnavailable {
    /// Creates a Transport error
    pub fn transport(widget: Widget, source: TransportError) -> Self {
        Self::Transport { widget, source }
    }

    /// Creates a Validation error
    pub fn validation(widget: Widget, source: ValidationError) -> Self {
        Self::Validation { widget, source }
    }

    /// The widget whose render failed
    pub fn widget(&self) -> Widget {
        match self {
            Self::Transport { widget, .. } => *widget,
            Self::Validation { widget, .. } => *widget,
        }
    }

    /// Generic text for the failing widget's region
    pub fn user_message(&self) -> &'static str {
        self.widget().unavailable_message()
    }
}
