use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateHallRequest {
    pub name: String,
    pub capacity: i32,
    pub total_chairs: i32,
    #[serde(default)]
    pub has_projector: bool,
    #[serde(default)]
    pub has_sound_system: bool,
    #[serde(default)]
    pub has_ac: bool,
    #[serde(default)]
    pub has_stage: bool,
}

#[derive(Deserialize)]
pub struct UpdateHallRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub total_chairs: Option<i32>,
    pub has_projector: Option<bool>,
    pub has_sound_system: Option<bool>,
    pub has_ac: Option<bool>,
    pub has_stage: Option<bool>,
}

#[derive(Deserialize)]
pub struct AvailableHallsQuery {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// All booking fields arrive optional so the admission path can report
/// missing required fields as a 400 instead of a deserialization failure.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub event_name: Option<String>,
    pub booking_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub hall_id: Option<String>,
    pub department: Option<String>,
    pub faculty_incharge: Option<String>,
    pub expected_audience: Option<i32>,
    pub chairs_required: Option<i32>,
    #[serde(default)]
    pub needs_projector: bool,
    #[serde(default)]
    pub needs_mic: bool,
    #[serde(default)]
    pub needs_sound_system: bool,
    pub additional_requirements: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckAvailabilityRequest {
    pub hall_id: String,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub exclude_booking_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub event_name: Option<String>,
    pub booking_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub hall_id: Option<String>,
    pub department: Option<String>,
    pub faculty_incharge: Option<String>,
    pub expected_audience: Option<i32>,
    pub chairs_required: Option<i32>,
    pub needs_projector: Option<bool>,
    pub needs_mic: Option<bool>,
    pub needs_sound_system: Option<bool>,
    pub additional_requirements: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AdminBookingsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub hall_id: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateHandlerRequest {
    pub name: String,
    pub email: String,
    pub system_type: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateHandlerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub system_type: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}
