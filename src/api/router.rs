use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, booking, hall, handler, health, member};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Members (admin)
        .route("/api/v1/members", post(member::create_member).get(member::list_members))
        .route("/api/v1/members/{user_id}", delete(member::delete_member))

        // Halls
        .route("/api/v1/halls", get(hall::list_halls).post(hall::create_hall))
        .route("/api/v1/halls/available", get(hall::available_halls))
        .route("/api/v1/halls/{hall_id}", get(hall::get_hall).put(hall::update_hall).delete(hall::delete_hall))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/check-availability", post(booking::check_availability))
        .route("/api/v1/bookings/date/{date}", get(booking::list_bookings_by_date))
        .route("/api/v1/bookings/my", get(booking::my_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking).put(booking::update_booking))

        // Admin review & audit
        .route("/api/v1/admin/bookings", get(admin::list_all_bookings))
        .route("/api/v1/admin/bookings/{booking_id}", delete(admin::delete_booking))
        .route("/api/v1/admin/bookings/{booking_id}/status", put(admin::update_booking_status))
        .route("/api/v1/admin/statistics", get(admin::get_statistics))

        // System handlers
        .route("/api/v1/handlers", get(handler::list_handlers).post(handler::create_handler))
        .route("/api/v1/handlers/{handler_id}", put(handler::update_handler).delete(handler::delete_handler))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
