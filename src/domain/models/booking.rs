use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

pub const STATUS_APPROVED: &str = "APPROVED";
pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_REJECTED: &str = "REJECTED";

pub fn is_valid_status(status: &str) -> bool {
    matches!(status, STATUS_APPROVED | STATUS_PENDING | STATUS_REJECTED)
}

/// A reservation of one hall for a half-open `[start_time, end_time)`
/// interval on a single calendar date. Dates and times are plain wall-clock
/// values; no timezone conversion happens anywhere in the booking path.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub hall_id: String,
    pub user_id: String,
    pub event_name: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub department: String,
    pub faculty_incharge: Option<String>,
    pub expected_audience: i32,
    pub chairs_required: i32,
    pub needs_projector: bool,
    pub needs_mic: bool,
    pub needs_sound_system: bool,
    pub additional_requirements: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct HallBookingCount {
    pub hall_name: String,
    pub booking_count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct DepartmentBookingCount {
    pub department: String,
    pub booking_count: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingStatistics {
    pub total_bookings: i64,
    pub upcoming_bookings: i64,
    pub past_bookings: i64,
    pub bookings_by_hall: Vec<HallBookingCount>,
    pub bookings_by_department: Vec<DepartmentBookingCount>,
}

pub struct NewBookingParams {
    pub hall_id: String,
    pub user_id: String,
    pub event_name: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub department: String,
    pub faculty_incharge: Option<String>,
    pub expected_audience: i32,
    pub chairs_required: i32,
    pub needs_projector: bool,
    pub needs_mic: bool,
    pub needs_sound_system: bool,
    pub additional_requirements: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            hall_id: params.hall_id,
            user_id: params.user_id,
            event_name: params.event_name,
            booking_date: params.booking_date,
            start_time: params.start_time,
            end_time: params.end_time,
            department: params.department,
            faculty_incharge: params.faculty_incharge,
            expected_audience: params.expected_audience,
            chairs_required: params.chairs_required,
            needs_projector: params.needs_projector,
            needs_mic: params.needs_mic,
            needs_sound_system: params.needs_sound_system,
            additional_requirements: params.additional_requirements,
            status: STATUS_APPROVED.to_string(),
            created_at: Utc::now(),
        }
    }

    /// System types this booking needs a facility handler for. Empty when no
    /// equipment flag is set.
    pub fn required_systems(&self) -> Vec<&'static str> {
        let mut systems = Vec::new();
        if self.needs_projector {
            systems.push("projector");
        }
        if self.needs_mic {
            systems.push("mic");
        }
        if self.needs_sound_system {
            systems.push("sound_system");
        }
        systems
    }
}
