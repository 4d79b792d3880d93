use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Film, FilmFilter, FilmPayload},
    store::FILM_NOT_FOUND,
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<FilmPayload>, AppError>,
) -> AppResult<(StatusCode, Json<Film>)> {
    let film = state.store.create_film(payload.into_new_film()?).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(filter), _): WithRejection<Query<FilmFilter>, AppError>,
) -> AppResult<Json<Value>> {
    let films: Vec<Film> =
        state.store.list_films().await?.into_iter().filter(|f| filter.matches(f)).collect();
    Ok(Json(json!({ "total": films.len(), "films": films })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Film>> {
    let film = state.store.find_film(film_id).await?;
    film.map(Json).ok_or_else(|| AppError::not_found(FILM_NOT_FOUND))
}

/// Merges the provided fields. An `id` in the body is ignored.
pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<FilmPayload>, AppError>,
) -> AppResult<Json<Film>> {
    let patch = payload.into_patch()?;
    let film = state.store.update_film(film_id, patch).await?;
    film.map(Json).ok_or_else(|| AppError::not_found(FILM_NOT_FOUND))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    if !state.store.delete_film(film_id).await? {
        return Err(AppError::not_found(FILM_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
