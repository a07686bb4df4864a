use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Hall {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub total_chairs: i32,
    pub has_projector: bool,
    pub has_sound_system: bool,
    pub has_ac: bool,
    pub has_stage: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewHallParams {
    pub name: String,
    pub capacity: i32,
    pub total_chairs: i32,
    pub has_projector: bool,
    pub has_sound_system: bool,
    pub has_ac: bool,
    pub has_stage: bool,
}

impl Hall {
    pub fn new(params: NewHallParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            capacity: params.capacity,
            total_chairs: params.total_chairs,
            has_projector: params.has_projector,
            has_sound_system: params.has_sound_system,
            has_ac: params.has_ac,
            has_stage: params.has_stage,
            created_at: Utc::now(),
        }
    }
}
