use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::CreateMemberRequest;
use crate::domain::models::user::{User, ROLE_ADMIN, ROLE_FACULTY};
use std::sync::Arc;
use crate::error::AppError;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use tracing::{info, error};

pub async fn create_member(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = payload.role.unwrap_or_else(|| ROLE_FACULTY.to_string());
    if role != ROLE_ADMIN && role != ROLE_FACULTY {
        return Err(AppError::Validation(format!("Invalid role: {}", role)));
    }

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = User::new(
        payload.name,
        payload.email,
        password_hash,
        role,
        payload.department,
        payload.phone,
    );
    let created = state.user_repo.create(&user).await?;

    info!("Created member user: {}", created.id);

    Ok(Json(serde_json::json!({
        "id": created.id,
        "name": created.name,
        "email": created.email,
        "role": created.role,
        "department": created.department,
        "created_at": created.created_at
    })))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let members = state.user_repo.list().await?;
    let safe_members: Vec<_> = members.into_iter().map(|u| serde_json::json!({
        "id": u.id,
        "name": u.name,
        "email": u.email,
        "role": u.role,
        "department": u.department,
        "created_at": u.created_at
    })).collect();

    Ok(Json(safe_members))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if admin.0.user_id == user_id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    let target = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    match state.user_repo.delete(&target.id).await {
        Ok(_) => {
            info!("Deleted user {}", user_id);
            Ok(Json(serde_json::json!({"status": "deleted"})))
        },
        Err(e) => {
            error!("Failed to delete user {}: {:?}", user_id, e);
            Err(e)
        }
    }
}
