use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const VALID_SYSTEM_TYPES: [&str; 4] = ["projector", "mic", "sound_system", "other"];

pub fn is_valid_system_type(system_type: &str) -> bool {
    VALID_SYSTEM_TYPES.contains(&system_type)
}

/// Facility staff member responsible for one equipment system type. Notified
/// whenever a booking requests that system.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SystemHandler {
    pub id: String,
    pub name: String,
    pub email: String,
    pub system_type: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SystemHandler {
    pub fn new(name: String, email: String, system_type: String, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            system_type,
            phone,
            created_at: Utc::now(),
        }
    }
}
