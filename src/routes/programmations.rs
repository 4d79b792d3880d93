use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tracing::warn;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{
        BatchError, BatchRequest, Loose, Programmation, ProgrammationPayload, Screening,
        ScreeningFilter, ScreeningRequest,
    },
    schedule,
    store::FILM_NOT_FOUND,
};

async fn ensure_film(state: &AppState, film_id: i32) -> AppResult<()> {
    match state.store.find_film(film_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found(FILM_NOT_FOUND)),
    }
}

pub async fn create_for_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(request), _): WithRejection<Json<ScreeningRequest>, AppError>,
) -> AppResult<(StatusCode, Json<Screening>)> {
    ensure_film(&state, film_id).await?;
    let new = request.into_new(None)?;
    let room_id = new.room_id;
    match state.store.schedule_screening(film_id, new).await {
        Ok(screening) => Ok((StatusCode::CREATED, Json(screening))),
        Err(err @ AppError::Conflict(_)) => {
            warn!(film_id, room_id, "screening rejected, room busy");
            Err(err)
        },
        Err(err) => Err(err),
    }
}

/// Every entry is tried on its own; the ones that land stay even when others
/// fail.
pub async fn create_batch(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(batch), _): WithRejection<Json<BatchRequest>, AppError>,
) -> AppResult<Response> {
    ensure_film(&state, film_id).await?;
    let Some(entries) = batch.seances else {
        return Err(AppError::validation("Le champ seances doit être une liste"));
    };

    let mut created = Vec::new();
    let mut errors = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let room = entry.room_id.as_ref().map(Loose::text).unwrap_or_default();
        let outcome = match entry.into_new(batch.default_tariffs) {
            Ok(new) => state.store.schedule_screening(film_id, new).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(screening) => created.push(screening),
            Err(AppError::Conflict(_)) => errors.push(BatchError {
                index,
                error: format!("Conflit pour la séance {}: salle {room} occupée", index + 1),
            }),
            Err(AppError::Validation(msg) | AppError::NotFound(msg)) => {
                errors.push(BatchError { index, error: format!("Séance {}: {msg}", index + 1) })
            },
            Err(err) => return Err(err),
        }
    }

    if !errors.is_empty() {
        warn!(film_id, created = created.len(), failed = errors.len(), "batch partially rejected");
        let body = json!({
            "message": "Certaines programmations n'ont pas pu être créées",
            "programmationsCreees": created,
            "erreurs": errors,
        });
        return Ok((StatusCode::CONFLICT, Json(body)).into_response());
    }

    let body = json!({
        "message": format!("{} programmations créées avec succès", created.len()),
        "programmations": created,
    });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn list_for_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(film_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Query(filter), _): WithRejection<Query<ScreeningFilter>, AppError>,
) -> AppResult<Json<Value>> {
    let day = filter.date.as_deref().map(schedule::parse_day).transpose()?;
    let screenings: Vec<Screening> = state
        .store
        .list_screenings(film_id)
        .await?
        .into_iter()
        .filter(|s| day.is_none_or(|d| schedule::day_of(s.starts_at) == d))
        .collect();
    Ok(Json(json!({ "total": screenings.len(), "programmations": screenings })))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<ProgrammationPayload>, AppError>,
) -> AppResult<(StatusCode, Json<Programmation>)> {
    let programmation = state.store.create_programmation(payload.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(programmation)))
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let programmations = state.store.list_programmations().await?;
    Ok(Json(json!({ "total": programmations.len(), "programmations": programmations })))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    if !state.store.delete_programmation(id).await? {
        return Err(AppError::not_found("Programmation non trouvée"));
    }
    Ok(StatusCode::NO_CONTENT)
}
