use crate::domain::enums::PaymentsErrorStatusCode;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GooglePayError>;

/// A malformed or inconsistent request, reported against the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Coarse classification of [`GooglePayError`], for callers that branch on the
/// kind of failure rather than on its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Capability,
    Cancelled,
    NotImplemented,
    State,
    Platform,
    Internal,
}

#[derive(Error, Debug)]
pub enum GooglePayError {
    #[error("Invalid request: {0}")]
    Validation(ValidationError),
    #[error("Unsupported API version {major}.{minor}")]
    UnsupportedApiVersion { major: u32, minor: u32 },
    #[error("Merchant configuration error: {0}")]
    MerchantConfiguration(String),
    #[error("Cancelled")]
    Cancelled,
    #[error("Method not implemented.")]
    NotImplemented { operation: &'static str },
    #[error("Service not initialized.")]
    NotInitialized,
    #[error("A payment sheet is already being presented")]
    Busy,
    #[error("{message}")]
    PaymentsClient {
        status_code: Option<PaymentsErrorStatusCode>,
        message: String,
    },
    #[error("Response violates the request contract: {0}")]
    ContractViolation(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GooglePayError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(field, reason))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::UnsupportedApiVersion { .. } | Self::MerchantConfiguration(_) => {
                ErrorKind::Capability
            }
            Self::Cancelled => ErrorKind::Cancelled,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::NotInitialized | Self::Busy => ErrorKind::State,
            Self::PaymentsClient { .. } => ErrorKind::Platform,
            Self::ContractViolation(_) | Self::Internal(_) | Self::Json(_) | Self::Io(_) => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<ValidationError> for GooglePayError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
