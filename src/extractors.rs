use super::{errors::ServerError, models};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// The `:id` segment of a note route.
///
/// An id that doesn't parse as an integer can't name any note, so it is
/// rejected as [`ServerError::NotFound`] rather than as a malformed request.
/// Handlers that treat a missing note as success (delete) take
/// `Option<NoteId>` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteId(pub models::NoteId);

#[async_trait]
impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ServerError::NotFound)?;

        raw.trim()
            .parse()
            .map(NoteId)
            .map_err(|_| ServerError::NotFound)
    }
}
