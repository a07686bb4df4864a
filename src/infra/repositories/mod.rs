pub mod postgres_auth_repo;
pub mod postgres_booking_repo;
pub mod postgres_hall_repo;
pub mod postgres_handler_repo;
pub mod postgres_job_repo;
pub mod postgres_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_hall_repo;
pub mod sqlite_handler_repo;
pub mod sqlite_job_repo;
pub mod sqlite_user_repo;
