use thiserror::Error;

use crate::schema::{FieldViolation, ValidationError};

/// Longest store diagnostic forwarded to API callers.
pub const MAX_DETAIL_CHARS: usize = 200;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("document store failure: {0}")]
    Store(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("unprocessable request: {message}")]
    Unprocessable { message: String, violations: Vec<FieldViolation>, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn correlation_id(&self) -> &str {
        match self {
            Self::Unprocessable { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::Unprocessable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Validation(error) => Self::Unprocessable {
                message: error.to_string(),
                violations: error.violations,
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::InvalidInput(message) => Self::Unprocessable {
                message,
                violations: Vec::new(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::StoreUnavailable(message) | ApplicationError::Store(message) => {
                Self::Internal {
                    message: truncate_detail(&message),
                    correlation_id: "unassigned".to_owned(),
                }
            }
        }
    }
}

pub fn truncate_detail(message: &str) -> String {
    if message.chars().count() <= MAX_DETAIL_CHARS {
        return message.to_owned();
    }
    message.chars().take(MAX_DETAIL_CHARS).collect()
}
