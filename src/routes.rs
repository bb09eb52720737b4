use super::{controllers, errors, middleware, models::AppState};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, Router},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

/// Advertised by `GET /` and by the 404 fallback. Keep in sync with
/// [`get_routes`].
pub const ENDPOINTS: &[&str] = &[
    "GET /",
    "GET /health",
    "GET /api/notes",
    "GET /api/notes/:id",
    "POST /api/notes",
    "PUT /api/notes/:id",
    "DELETE /api/notes/:id",
];

// A known path with the wrong method gets the same 404 as an unknown path,
// hence the per-route fallbacks.
#[rustfmt::skip]
pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controllers::root).fallback(controllers::not_found))
        .route("/health", get(controllers::health).fallback(controllers::not_found))
        .route(
            "/api/notes",
            get(controllers::list_notes)
                .post(controllers::create_note)
                .fallback(controllers::not_found),
        )
        .route(
            "/api/notes/:id",
            get(controllers::get_note)
                .put(controllers::update_note)
                .delete(controllers::delete_note)
                .fallback(controllers::not_found),
        )
        .fallback(controllers::not_found)
}

/// Wrap `routes` in the service-wide layers and bind the state. Layers run
/// top to bottom on the way in: CORS, request log, fault detail, panic
/// catcher.
pub fn build_app(routes: Router<AppState>, state: AppState) -> Router {
    let fault_detail =
        from_fn_with_state(state.config.clone(), middleware::expose_fault_detail);

    routes
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(from_fn(middleware::log_requests))
                .layer(fault_detail)
                .layer(CatchPanicLayer::custom(errors::panic_response)),
        )
        .with_state(state)
}
