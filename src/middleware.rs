use super::{
    config::Config,
    errors::{FaultDetail, INTERNAL_ERROR},
};
use axum::{
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;

/// Every request is logged before it is handled.
pub async fn log_requests<B>(request: Request<B>, next: Next<B>) -> Response {
    log::info!(
        "{} - {} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        request.method(),
        request.uri().path()
    );

    next.run(request).await
}

/// Internal faults always answer with a generic body. In development, the
/// detail recorded by the failing handler is spliced back in.
pub async fn expose_fault_detail<B>(
    State(config): State<Arc<Config>>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let response = next.run(request).await;
    if !config.is_development() {
        return response;
    }
    match response.extensions().get::<FaultDetail>().cloned() {
        Some(FaultDetail(detail)) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            let body = Json(json!({
                "error": INTERNAL_ERROR,
                "message": detail,
            }));
            (parts.status, parts.headers, body).into_response()
        }
        None => response,
    }
}
