use crate::domain::models::{
    booking::{Booking, BookingStatistics},
    hall::Hall,
    handler::SystemHandler,
    job::Job,
    user::User,
    auth::RefreshTokenRecord,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

/// Admin listing filters. All optional; `start_date`/`end_date` are an
/// inclusive range over `booking_date`.
#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub hall_id: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
}

#[async_trait]
pub trait HallRepository: Send + Sync {
    async fn create(&self, hall: &Hall) -> Result<Hall, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Hall>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Hall>, AppError>;
    async fn list(&self) -> Result<Vec<Hall>, AppError>;
    /// Halls with no approved booking overlapping `[start, end)` on `date`.
    async fn list_available(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Hall>, AppError>;
    async fn update(&self, hall: &Hall) -> Result<Hall, AppError>;
    /// Fails with Conflict while any booking still references the hall.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking together with its notification jobs. The overlap
    /// test against approved rows on the same hall/date runs inside the
    /// insert transaction; a lost race surfaces as `SlotConflict` and
    /// nothing is written.
    async fn insert_checked(&self, booking: &Booking, jobs: Vec<Job>) -> Result<Booking, AppError>;
    /// Full-field update with the same transactional overlap guard,
    /// excluding the booking itself.
    async fn update_checked(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Status transition. A transition into APPROVED re-runs the overlap
    /// guard; other targets only release constraint pressure and commit
    /// unconditionally.
    async fn update_status_checked(&self, id: &str, status: &str) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// The resolver's input partition: approved rows for one hall and date.
    async fn list_approved_for_slot(
        &self,
        hall_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_filtered(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn statistics(&self, today: NaiveDate) -> Result<BookingStatistics, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait HandlerRepository: Send + Sync {
    async fn create(&self, handler: &SystemHandler) -> Result<SystemHandler, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<SystemHandler>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<SystemHandler>, AppError>;
    async fn list(&self) -> Result<Vec<SystemHandler>, AppError>;
    async fn list_by_system_types(&self, types: &[&str]) -> Result<Vec<SystemHandler>, AppError>;
    async fn update(&self, handler: &SystemHandler) -> Result<SystemHandler, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(
        &self,
        id: &str,
        status: &str,
        error_message: Option<String>,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
