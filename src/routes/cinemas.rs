use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Cinema, CinemaPayload},
    store::CINEMA_NOT_FOUND,
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<CinemaPayload>, AppError>,
) -> AppResult<(StatusCode, Json<Cinema>)> {
    let cinema = state.store.create_cinema(payload.into_new_cinema()?).await?;
    Ok((StatusCode::CREATED, Json(cinema)))
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let cinemas = state.store.list_cinemas().await?;
    Ok(Json(json!({ "total": cinemas.len(), "cinemas": cinemas })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Cinema>> {
    let cinema = state.store.find_cinema(id).await?;
    cinema.map(Json).ok_or_else(|| AppError::not_found(CINEMA_NOT_FOUND))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<CinemaPayload>, AppError>,
) -> AppResult<Json<Cinema>> {
    let cinema = state.store.update_cinema(id, payload.into_patch()?).await?;
    cinema.map(Json).ok_or_else(|| AppError::not_found(CINEMA_NOT_FOUND))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    if !state.store.delete_cinema(id).await? {
        return Err(AppError::not_found(CINEMA_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
