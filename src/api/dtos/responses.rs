use serde::Serialize;
use crate::domain::models::booking::Booking;

/// Pre-check result: `available` is true iff `conflicts` is empty.
#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub conflicts: Vec<Booking>,
}
