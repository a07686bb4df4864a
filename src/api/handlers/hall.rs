use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{AvailableHallsQuery, CreateHallRequest, UpdateHallRequest};
use crate::api::handlers::booking::{parse_date, parse_time};
use crate::domain::models::hall::{Hall, NewHallParams};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_halls(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let halls = state.hall_repo.list().await?;
    Ok(Json(halls))
}

pub async fn available_halls(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<AvailableHallsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&query.date)?;
    let start = parse_time(&query.start_time)?;
    let end = parse_time(&query.end_time)?;

    if start >= end {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    let halls = state.hall_repo.list_available(date, start, end).await?;
    Ok(Json(halls))
}

pub async fn get_hall(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(hall_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hall = state.hall_repo.find_by_id(&hall_id).await?
        .ok_or(AppError::NotFound("Hall not found".into()))?;
    Ok(Json(hall))
}

pub async fn create_hall(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateHallRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.capacity <= 0 || payload.total_chairs < 0 {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }

    if state.hall_repo.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict("Hall name already exists".into()));
    }

    let hall = Hall::new(NewHallParams {
        name: payload.name,
        capacity: payload.capacity,
        total_chairs: payload.total_chairs,
        has_projector: payload.has_projector,
        has_sound_system: payload.has_sound_system,
        has_ac: payload.has_ac,
        has_stage: payload.has_stage,
    });

    let created = state.hall_repo.create(&hall).await?;
    info!("Hall created: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn update_hall(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hall_id): Path<String>,
    Json(payload): Json<UpdateHallRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut hall = state.hall_repo.find_by_id(&hall_id).await?
        .ok_or(AppError::NotFound("Hall not found".into()))?;

    if let Some(name) = payload.name {
        if name != hall.name && state.hall_repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict("Hall name already exists".into()));
        }
        hall.name = name;
    }
    if let Some(capacity) = payload.capacity { hall.capacity = capacity; }
    if let Some(total_chairs) = payload.total_chairs { hall.total_chairs = total_chairs; }
    if let Some(has_projector) = payload.has_projector { hall.has_projector = has_projector; }
    if let Some(has_sound_system) = payload.has_sound_system { hall.has_sound_system = has_sound_system; }
    if let Some(has_ac) = payload.has_ac { hall.has_ac = has_ac; }
    if let Some(has_stage) = payload.has_stage { hall.has_stage = has_stage; }

    let updated = state.hall_repo.update(&hall).await?;
    info!("Hall updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_hall(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(hall_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.hall_repo.delete(&hall_id).await?;
    info!("Hall deleted: {}", hall_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
