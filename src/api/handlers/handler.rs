use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{CreateHandlerRequest, UpdateHandlerRequest};
use crate::domain::models::handler::{is_valid_system_type, SystemHandler};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateHandlerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_system_type(&payload.system_type) {
        return Err(AppError::Validation(format!("Invalid system type: {}", payload.system_type)));
    }

    if state.handler_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Handler email already exists".into()));
    }

    let handler = SystemHandler::new(payload.name, payload.email, payload.system_type, payload.phone);
    let created = state.handler_repo.create(&handler).await?;

    info!("System handler created: {} ({})", created.name, created.system_type);
    Ok(Json(created))
}

pub async fn list_handlers(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let handlers = state.handler_repo.list().await?;
    Ok(Json(handlers))
}

pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(handler_id): Path<String>,
    Json(payload): Json<UpdateHandlerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut handler = state.handler_repo.find_by_id(&handler_id).await?
        .ok_or(AppError::NotFound("Handler not found".into()))?;

    if let Some(name) = payload.name { handler.name = name; }
    if let Some(email) = payload.email {
        if email != handler.email && state.handler_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Handler email already exists".into()));
        }
        handler.email = email;
    }
    if let Some(system_type) = payload.system_type {
        if !is_valid_system_type(&system_type) {
            return Err(AppError::Validation(format!("Invalid system type: {}", system_type)));
        }
        handler.system_type = system_type;
    }
    if let Some(phone) = payload.phone { handler.phone = Some(phone); }

    let updated = state.handler_repo.update(&handler).await?;
    info!("System handler updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(handler_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.handler_repo.delete(&handler_id).await?;
    info!("System handler deleted: {}", handler_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
