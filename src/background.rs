use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;
use crate::domain::models::job::{Job, JOB_CONFIRMATION, JOB_HANDLER_NOTICE};
use crate::error::AppError;

/// Drains pending notification jobs and delivers them via the email service.
/// Booking success was decided long before this runs; a failed delivery only
/// marks the job FAILED.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting notification job worker...");

    loop {
        match state.job_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "notification_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                        booking_id = %job.payload.booking_id
                    );

                    let state = state.clone();

                    async move {
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            },
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let booking = state.booking_repo.find_by_id(&job.payload.booking_id).await?
        .ok_or(AppError::NotFound(format!("Booking {} not found", job.payload.booking_id)))?;
    let hall = state.hall_repo.find_by_id(&booking.hall_id).await?
        .ok_or(AppError::NotFound(format!("Hall {} not found", booking.hall_id)))?;
    let requester = state.user_repo.find_by_id(&booking.user_id).await?
        .ok_or(AppError::NotFound(format!("User {} not found", booking.user_id)))?;

    let mut context = tera::Context::new();
    context.insert("event_name", &booking.event_name);
    context.insert("hall_name", &hall.name);
    context.insert("booking_date", &booking.booking_date.format("%Y-%m-%d").to_string());
    context.insert("start_time", &booking.start_time.format("%H:%M").to_string());
    context.insert("end_time", &booking.end_time.format("%H:%M").to_string());
    context.insert("department", &booking.department);
    context.insert("booked_by", &requester.name);
    context.insert("additional_requirements", &booking.additional_requirements);

    match job.job_type.as_str() {
        JOB_CONFIRMATION => {
            context.insert("expected_audience", &booking.expected_audience);
            context.insert("chairs_required", &booking.chairs_required);
            context.insert("required_systems", &booking.required_systems());

            let body = state.templates.render("confirmation.html", &context)
                .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
            let subject = format!("Booking Confirmation - {}", booking.event_name);

            info!("Sending confirmation email to {}", requester.email);
            state.email_service.send(&requester.email, &subject, &body).await?;
        }
        JOB_HANDLER_NOTICE => {
            let handler_id = job.payload.handler_id.as_ref()
                .ok_or(AppError::InternalWithMsg("Handler notice job missing handler_id".into()))?;
            let handler = state.handler_repo.find_by_id(handler_id).await?
                .ok_or(AppError::NotFound(format!("Handler {} not found", handler_id)))?;

            context.insert("handler_name", &handler.name);
            context.insert("system_type", &handler.system_type);
            context.insert("faculty_incharge", &booking.faculty_incharge);

            let body = state.templates.render("handler_notice.html", &context)
                .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
            let subject = format!("System Setup Required - {}", booking.event_name);

            info!("Notifying handler {} ({})", handler.name, handler.system_type);
            state.email_service.send(&handler.email, &subject, &body).await?;
        }
        other => {
            return Err(AppError::InternalWithMsg(format!("Unknown job type {}", other)));
        }
    }

    Ok(())
}
