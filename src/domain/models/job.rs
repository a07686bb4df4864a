use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const JOB_CONFIRMATION: &str = "CONFIRMATION";
pub const JOB_HANDLER_NOTICE: &str = "HANDLER_NOTICE";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobPayload {
    pub booking_id: String,
    pub handler_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Job {
    pub id: String,
    pub job_type: String,
    pub payload: Json<JobPayload>,
    pub execute_at: DateTime<Utc>,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn confirmation(booking_id: String) -> Self {
        Self::new(JOB_CONFIRMATION, booking_id, None)
    }

    pub fn handler_notice(booking_id: String, handler_id: String) -> Self {
        Self::new(JOB_HANDLER_NOTICE, booking_id, Some(handler_id))
    }

    fn new(job_type: &str, booking_id: String, handler_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_type: job_type.to_string(),
            payload: Json(JobPayload { booking_id, handler_id }),
            execute_at: Utc::now(),
            status: "PENDING".to_string(),
            error_message: None,
            created_at: Utc::now(),
        }
    }
}
