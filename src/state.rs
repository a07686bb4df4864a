use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, BookingRepository, EmailService, HallRepository,
    HandlerRepository, JobRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hall_repo: Arc<dyn HallRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub handler_repo: Arc<dyn HandlerRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
