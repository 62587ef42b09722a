//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and JSON envelopes; the domain only decides which category a
//! failure belongs to and which machine-readable reason it carries.

use serde::{Deserialize, Serialize};

use crate::domain::TraceId;
use crate::domain::ports::DocumentStoreError;

/// Reason attached to every lookup miss.
pub const ITEM_NOT_FOUND: &str = "item_not_found";

/// Reason attached to redacted internal failures.
pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";

/// Stable machine-readable error category.
///
/// On the wire a category is its HTTP status number (`400`, `404`, `500`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(into = "u16", try_from = "u16")]
pub enum ErrorCode {
    /// The payload or query failed a domain rule.
    InvalidRequest,
    /// The targeted record does not exist.
    NotFound,
    /// An unexpected failure inside the service or the store.
    InternalError,
}

impl ErrorCode {
    /// HTTP status number sent as the envelope `code`.
    pub const fn status(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.status()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(status: u16) -> Result<Self, Self::Error> {
        match status {
            400 => Ok(Self::InvalidRequest),
            404 => Ok(Self::NotFound),
            500 => Ok(Self::InternalError),
            other => Err(format!("unknown error status {other}")),
        }
    }
}

/// Domain error payload.
///
/// `error` is the fine-grained reason (for example `product.name.missing`),
/// `code` the category adapters use to pick a status.
///
/// # Examples
/// ```
/// use recipebook::domain::{Error, ErrorCode};
///
/// let err = Error::validation("category.name.missing", "Category name is missing");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.reason(), "category.name.missing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Build an error, capturing the trace identifier in scope, if any.
    pub fn new(code: ErrorCode, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            error: reason.into(),
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Input rejected by a domain rule.
    pub fn validation(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, reason, message)
    }

    /// Lookup miss with a custom reason.
    pub fn not_found(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, reason, message)
    }

    /// Lookup miss for a record identifier.
    pub fn item_not_found() -> Self {
        Self::not_found(ITEM_NOT_FOUND, "Item not found")
    }

    /// Unexpected failure. The message is logged but never shown to clients.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, INTERNAL_SERVER_ERROR, message)
    }

    /// Replace the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Error category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Fine-grained machine-readable reason.
    pub fn reason(&self) -> &str {
        self.error.as_str()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier of the request that produced the error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Copy suitable for clients: internal failures lose their message.
    #[must_use]
    pub fn redacted(&self) -> Self {
        if matches!(self.code, ErrorCode::InternalError) {
            Self {
                code: ErrorCode::InternalError,
                error: INTERNAL_SERVER_ERROR.to_owned(),
                message: "Internal server error".to_owned(),
                trace_id: self.trace_id.clone(),
            }
        } else {
            self.clone()
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for Error {}

impl From<DocumentStoreError> for Error {
    fn from(err: DocumentStoreError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<bson::de::Error> for Error {
    fn from(err: bson::de::Error) -> Self {
        Self::internal(format!("record decoding failed: {err}"))
    }
}

impl From<bson::ser::Error> for Error {
    fn from(err: bson::ser::Error) -> Self {
        Self::internal(format!("record encoding failed: {err}"))
    }
}
