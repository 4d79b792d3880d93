use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, auth};

pub mod cinemas;
pub mod films;
pub mod programmations;

pub fn router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/api/films", get(films::list))
        .route("/api/films/{film_id}", get(films::show))
        .route("/api/films/{film_id}/programmations", get(programmations::list_for_film))
        .route("/api/cinemas", get(cinemas::list))
        .route("/api/cinemas/{id}", get(cinemas::show))
        .route("/api/programmations", get(programmations::list));

    let protected = Router::new()
        .route("/api/films", post(films::create))
        .route("/api/films/{film_id}", put(films::update).delete(films::delete))
        .route("/api/films/{film_id}/programmations", post(programmations::create_for_film))
        .route("/api/films/{film_id}/programmations/batch", post(programmations::create_batch))
        .route("/api/cinemas", post(cinemas::create))
        .route("/api/cinemas/{id}", put(cinemas::update).delete(cinemas::delete))
        .route("/api/programmations", post(programmations::create))
        .route("/api/programmations/{id}", delete(programmations::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new()
        .route("/health", get(health))
        .merge(public)
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route non trouvée" })))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Erreur interne du serveur" })))
        .into_response()
}
