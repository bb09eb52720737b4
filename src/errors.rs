use super::routes::ENDPOINTS;
use anyhow::{anyhow, Error};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::any::Any;

pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug)]
pub enum ServerError {
    /// The request body was missing something we require, or wasn't JSON.
    InvalidInput(String),
    /// No note with the requested id.
    NotFound,
    /// No route matched the method and path.
    RouteNotFound,
    Internal(Error),
}

/// Attached to 500 responses so the fault detail can be surfaced later by
/// [`crate::middleware::expose_fault_detail`] when running in development.
/// The response body itself never contains it.
#[derive(Clone, Debug)]
pub struct FaultDetail(pub String);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
                    .into_response()
            }
            ServerError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Note not found" })),
            )
                .into_response(),
            ServerError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Endpoint not found",
                    "availableEndpoints": ENDPOINTS,
                })),
            )
                .into_response(),
            ServerError::Internal(err) => {
                log::error!("{:?}", err);
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": INTERNAL_ERROR })),
                )
                    .into_response();
                response
                    .extensions_mut()
                    .insert(FaultDetail(format!("{:#}", err)));
                response
            }
        }
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, ServerError>`. That way you don't need to do
// that manually.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

/// Turns a handler panic (caught by `CatchPanicLayer`) into the same response
/// an internal error gets.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let msg = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ServerError::Internal(anyhow!("handler panicked: {msg}")).into_response()
}
