use axum::{
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use crmsuite_core::errors::{ApplicationError, InterfaceError};
use crmsuite_db::StoreError;
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

pub const CORRELATION_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Failure leaving an HTTP handler, already mapped to its interface shape.
#[derive(Debug)]
pub struct ApiError(InterfaceError);

impl ApiError {
    pub fn new(error: ApplicationError, operation: &'static str) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        match &error {
            ApplicationError::Validation(_) | ApplicationError::InvalidInput(_) => warn!(
                event_name = "api.request.rejected",
                correlation_id = %correlation_id,
                operation,
                error = %error,
                "request rejected"
            ),
            ApplicationError::StoreUnavailable(_) | ApplicationError::Store(_) => error!(
                event_name = "api.request.store_failed",
                correlation_id = %correlation_id,
                operation,
                error = %error,
                "document store operation failed"
            ),
        }
        Self(error.into_interface(correlation_id))
    }

    pub fn invalid_input(message: impl Into<String>, operation: &'static str) -> Self {
        Self::new(ApplicationError::InvalidInput(message.into()), operation)
    }

    pub fn store(error: StoreError, operation: &'static str) -> Self {
        Self::new(ApplicationError::from(error), operation)
    }

    pub fn interface(&self) -> &InterfaceError {
        &self.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = HeaderValue::from_str(self.0.correlation_id()).ok();
        let (status, body) = match self.0 {
            InterfaceError::Unprocessable { violations, .. } if !violations.is_empty() => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": violations }))
            }
            InterfaceError::Unprocessable { message, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": message }))
            }
            InterfaceError::Internal { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "detail": message }))
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(value) = correlation_id {
            response.headers_mut().insert(CORRELATION_HEADER, value);
        }
        response
    }
}
