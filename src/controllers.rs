use super::{
    errors::ServerError,
    extractors::NoteId,
    models::{AppState, Health, ImportanceUpdate, NewNote, ServiceInfo},
    routes::ENDPOINTS,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;

pub const SERVICE_NAME: &str = "Notes API";

/// A request without a JSON content type is read as an empty object, the same
/// as a client that sent `{}`. Anything that claims to be JSON but isn't
/// usable is the client's fault.
fn body_or_default<T>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ServerError>
where
    T: DeserializeOwned + Default,
{
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(ServerError::InvalidInput(rejection.body_text())),
    }
}

pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.to_vec(),
    })
}

pub async fn health(
    State(AppState { config, .. }): State<AppState>,
) -> impl IntoResponse {
    Json(Health {
        status: "OK",
        service: SERVICE_NAME,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: config.environment.clone(),
    })
}

pub async fn list_notes(
    State(AppState { store, .. }): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    Ok(Json(store.list().await?))
}

pub async fn get_note(
    State(AppState { store, .. }): State<AppState>,
    NoteId(id): NoteId,
) -> Result<impl IntoResponse, ServerError> {
    let note = store.get(id).await?.ok_or(ServerError::NotFound)?;

    Ok(Json(note))
}

pub async fn create_note(
    State(AppState { store, .. }): State<AppState>,
    body: Result<Json<NewNote>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let NewNote { content, important } = body_or_default(body)?;
    let content = match content {
        Some(c) if !c.is_empty() => c,
        _ => {
            return Err(ServerError::InvalidInput(
                "Content is required".to_string(),
            ))
        }
    };

    let note = store.create(content, important.unwrap_or(false)).await?;
    log::debug!("created note {}", note.id);

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(AppState { store, .. }): State<AppState>,
    NoteId(id): NoteId,
    body: Result<Json<ImportanceUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let ImportanceUpdate { important } = body_or_default(body)?;
    let note = store
        .set_importance(id, important)
        .await?
        .ok_or(ServerError::NotFound)?;

    Ok(Json(note))
}

/// Always 204: an id that is unknown, or not even a number, is already
/// "deleted".
pub async fn delete_note(
    State(AppState { store, .. }): State<AppState>,
    id: Option<NoteId>,
) -> Result<impl IntoResponse, ServerError> {
    if let Some(NoteId(id)) = id {
        store.delete(id).await?;
        log::debug!("deleted note {id}");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found() -> ServerError {
    ServerError::RouteNotFound
}
