use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{AdminBookingsQuery, UpdateBookingStatusRequest};
use crate::api::handlers::booking::parse_date;
use crate::domain::models::booking::is_valid_status;
use crate::domain::ports::BookingFilter;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(status) = &query.status {
        if !is_valid_status(status) {
            return Err(AppError::Validation(format!("Invalid status: {}", status)));
        }
    }

    let filter = BookingFilter {
        start_date: query.start_date.as_deref().map(parse_date).transpose()?,
        end_date: query.end_date.as_deref().map(parse_date).transpose()?,
        hall_id: query.hall_id,
        status: query.status,
        department: query.department,
    };

    let bookings = state.booking_repo.list_filtered(&filter).await?;
    Ok(Json(bookings))
}

pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.booking_repo.statistics(Utc::now().date_naive()).await?;
    Ok(Json(stats))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_status(&payload.status) {
        return Err(AppError::Validation(format!("Invalid status: {}", payload.status)));
    }

    // Re-approval goes back through the overlap guard inside the repository;
    // demotions commit unconditionally.
    let updated = state.booking_repo.update_status_checked(&booking_id, &payload.status).await?;
    info!("Booking {} status set to {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.delete(&booking_id).await?;
    info!("Booking deleted: {}", booking_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
