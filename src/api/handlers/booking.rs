use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CheckAvailabilityRequest, CreateBookingRequest, UpdateBookingRequest};
use crate::api::dtos::responses::AvailabilityResponse;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::job::Job;
use crate::domain::models::user::ROLE_ADMIN;
use crate::domain::services::availability::find_conflicts;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Gate 1: required fields, then interval sanity. Overlap testing assumes
    // a well-formed half-open interval.
    let (event_name, date_str, start_str, end_str, hall_id) = match (
        payload.event_name,
        payload.booking_date,
        payload.start_time,
        payload.end_time,
        payload.hall_id,
    ) {
        (Some(a), Some(b), Some(c), Some(d), Some(e)) => (a, b, c, d, e),
        _ => return Err(AppError::Validation("Please provide all required fields".into())),
    };

    let booking_date = parse_date(&date_str)?;
    let start_time = parse_time(&start_str)?;
    let end_time = parse_time(&end_str)?;

    if start_time >= end_time {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    // Gate 2: advisory conflict check. The authoritative check runs again
    // inside the insert transaction.
    let existing = state.booking_repo.list_approved_for_slot(&hall_id, booking_date).await?;
    let conflicts = find_conflicts(&existing, start_time, end_time, None);
    if !conflicts.is_empty() {
        warn!("Booking rejected: {} conflict(s) on hall {} for {}", conflicts.len(), hall_id, booking_date);
        return Err(AppError::SlotConflict(conflicts));
    }

    // Gate 3: hall existence.
    let hall = state.hall_repo.find_by_id(&hall_id).await?
        .ok_or(AppError::NotFound("Hall not found".into()))?;

    // Gate 4: chair inventory.
    let chairs_required = payload.chairs_required.unwrap_or(0);
    if chairs_required > hall.total_chairs {
        return Err(AppError::Validation(format!(
            "Requested chairs ({}) exceed hall capacity ({})",
            chairs_required, hall.total_chairs
        )));
    }

    let booking = Booking::new(NewBookingParams {
        hall_id: hall.id.clone(),
        user_id: user.user_id,
        event_name,
        booking_date,
        start_time,
        end_time,
        department: payload.department.unwrap_or_default(),
        faculty_incharge: payload.faculty_incharge,
        expected_audience: payload.expected_audience.unwrap_or(0),
        chairs_required,
        needs_projector: payload.needs_projector,
        needs_mic: payload.needs_mic,
        needs_sound_system: payload.needs_sound_system,
        additional_requirements: payload.additional_requirements,
    });

    // Notifications ride the same transaction as the insert and are
    // delivered by the background worker. A booking never fails because
    // email delivery does.
    let mut jobs = vec![Job::confirmation(booking.id.clone())];
    let required = booking.required_systems();
    if !required.is_empty() {
        for handler in state.handler_repo.list_by_system_types(&required).await? {
            jobs.push(Job::handler_notice(booking.id.clone(), handler.id));
        }
    }

    let created = state.booking_repo.insert_checked(&booking, jobs).await?;

    info!("Booking created: {} for hall {} on {}", created.id, created.hall_id, created.booking_date);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CheckAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking_date = parse_date(&payload.booking_date)?;
    let start_time = parse_time(&payload.start_time)?;
    let end_time = parse_time(&payload.end_time)?;

    if start_time >= end_time {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    // The resolver cannot tell a free slot from a hall that does not exist,
    // so existence is checked here first.
    state.hall_repo.find_by_id(&payload.hall_id).await?
        .ok_or(AppError::NotFound("Hall not found".into()))?;

    let existing = state.booking_repo.list_approved_for_slot(&payload.hall_id, booking_date).await?;
    let conflicts = find_conflicts(
        &existing,
        start_time,
        end_time,
        payload.exclude_booking_id.as_deref(),
    );

    Ok(Json(AvailabilityResponse {
        available: conflicts.is_empty(),
        conflicts,
    }))
}

pub async fn list_bookings_by_date(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    let bookings = state.booking_repo.list_by_date(date).await?;
    Ok(Json(bookings))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user.user_id).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if user.role != ROLE_ADMIN && booking.user_id != user.user_id {
        return Err(AppError::Forbidden("Not your booking".into()));
    }

    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if user.role != ROLE_ADMIN && booking.user_id != user.user_id {
        return Err(AppError::Forbidden("Not your booking".into()));
    }

    if let Some(event_name) = payload.event_name { booking.event_name = event_name; }
    if let Some(date_str) = payload.booking_date { booking.booking_date = parse_date(&date_str)?; }
    if let Some(start_str) = payload.start_time { booking.start_time = parse_time(&start_str)?; }
    if let Some(end_str) = payload.end_time { booking.end_time = parse_time(&end_str)?; }
    if let Some(hall_id) = payload.hall_id { booking.hall_id = hall_id; }
    if let Some(department) = payload.department { booking.department = department; }
    if let Some(faculty_incharge) = payload.faculty_incharge { booking.faculty_incharge = Some(faculty_incharge); }
    if let Some(expected_audience) = payload.expected_audience { booking.expected_audience = expected_audience; }
    if let Some(chairs_required) = payload.chairs_required { booking.chairs_required = chairs_required; }
    if let Some(needs_projector) = payload.needs_projector { booking.needs_projector = needs_projector; }
    if let Some(needs_mic) = payload.needs_mic { booking.needs_mic = needs_mic; }
    if let Some(needs_sound_system) = payload.needs_sound_system { booking.needs_sound_system = needs_sound_system; }
    if let Some(additional_requirements) = payload.additional_requirements {
        booking.additional_requirements = Some(additional_requirements);
    }

    if booking.start_time >= booking.end_time {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    let hall = state.hall_repo.find_by_id(&booking.hall_id).await?
        .ok_or(AppError::NotFound("Hall not found".into()))?;

    if booking.chairs_required > hall.total_chairs {
        return Err(AppError::Validation(format!(
            "Requested chairs ({}) exceed hall capacity ({})",
            booking.chairs_required, hall.total_chairs
        )));
    }

    // Re-validate the moved interval against everyone else on that hall/date.
    let existing = state.booking_repo
        .list_approved_for_slot(&booking.hall_id, booking.booking_date)
        .await?;
    let conflicts = find_conflicts(&existing, booking.start_time, booking.end_time, Some(&booking.id));
    if !conflicts.is_empty() {
        return Err(AppError::SlotConflict(conflicts));
    }

    let updated = state.booking_repo.update_checked(&booking).await?;
    info!("Booking updated: {}", updated.id);
    Ok(Json(updated))
}
