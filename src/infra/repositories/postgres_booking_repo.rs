use crate::domain::{
    models::booking::{Booking, BookingStatistics, DepartmentBookingCount, HallBookingCount, STATUS_APPROVED},
    models::job::Job,
    ports::{BookingFilter, BookingRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::NaiveDate;

/// The transactional overlap re-check mirrors the SQLite backend, but here
/// the schema-level exclusion constraint on bookings is the final authority;
/// a raced insert that slips past the re-check fails with 23P01 and is
/// mapped to a conflict response.
pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const OVERLAP_WHERE: &str =
    "hall_id = $1 AND booking_date = $2 AND status = 'APPROVED' AND start_time < $3 AND end_time > $4";

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn insert_checked(&self, booking: &Booking, jobs: Vec<Job>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let conflicts = sqlx::query_as::<_, Booking>(
            &format!("SELECT * FROM bookings WHERE {OVERLAP_WHERE}")
        )
            .bind(&booking.hall_id)
            .bind(booking.booking_date)
            .bind(booking.end_time)
            .bind(booking.start_time)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if !conflicts.is_empty() {
            return Err(AppError::SlotConflict(conflicts));
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, hall_id, user_id, event_name, booking_date, start_time, end_time, department, faculty_incharge, expected_audience, chairs_required, needs_projector, needs_mic, needs_sound_system, additional_requirements, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.hall_id).bind(&booking.user_id).bind(&booking.event_name)
            .bind(booking.booking_date).bind(booking.start_time).bind(booking.end_time)
            .bind(&booking.department).bind(&booking.faculty_incharge)
            .bind(booking.expected_audience).bind(booking.chairs_required)
            .bind(booking.needs_projector).bind(booking.needs_mic).bind(booking.needs_sound_system)
            .bind(&booking.additional_requirements).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        for job in jobs {
            sqlx::query("INSERT INTO jobs (id, job_type, payload, execute_at, status, error_message, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)")
                .bind(&job.id).bind(&job.job_type).bind(&job.payload).bind(job.execute_at)
                .bind(&job.status).bind(&job.error_message).bind(job.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn update_checked(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if booking.status == STATUS_APPROVED {
            let conflicts = sqlx::query_as::<_, Booking>(
                &format!("SELECT * FROM bookings WHERE {OVERLAP_WHERE} AND id != $5")
            )
                .bind(&booking.hall_id)
                .bind(booking.booking_date)
                .bind(booking.end_time)
                .bind(booking.start_time)
                .bind(&booking.id)
                .fetch_all(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            if !conflicts.is_empty() {
                return Err(AppError::SlotConflict(conflicts));
            }
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET hall_id=$1, event_name=$2, booking_date=$3, start_time=$4, end_time=$5, department=$6, faculty_incharge=$7, expected_audience=$8, chairs_required=$9, needs_projector=$10, needs_mic=$11, needs_sound_system=$12, additional_requirements=$13
             WHERE id=$14
             RETURNING *"
        )
            .bind(&booking.hall_id).bind(&booking.event_name).bind(booking.booking_date)
            .bind(booking.start_time).bind(booking.end_time).bind(&booking.department)
            .bind(&booking.faculty_incharge).bind(booking.expected_audience).bind(booking.chairs_required)
            .bind(booking.needs_projector).bind(booking.needs_mic).bind(booking.needs_sound_system)
            .bind(&booking.additional_requirements).bind(&booking.id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn update_status_checked(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if status == STATUS_APPROVED {
            let conflicts = sqlx::query_as::<_, Booking>(
                &format!("SELECT * FROM bookings WHERE {OVERLAP_WHERE} AND id != $5")
            )
                .bind(&booking.hall_id)
                .bind(booking.booking_date)
                .bind(booking.end_time)
                .bind(booking.start_time)
                .bind(id)
                .fetch_all(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            if !conflicts.is_empty() {
                return Err(AppError::SlotConflict(conflicts));
            }
        }

        let updated = sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_approved_for_slot(&self, hall_id: &str, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE hall_id = $1 AND booking_date = $2 AND status = 'APPROVED' ORDER BY start_time ASC"
        )
            .bind(hall_id)
            .bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_date = $1 ORDER BY start_time ASC")
            .bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC, start_time DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_filtered(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        let mut sql = String::from("SELECT * FROM bookings WHERE 1=1");
        let mut arg = 0;

        if filter.start_date.is_some() && filter.end_date.is_some() {
            sql.push_str(&format!(" AND booking_date BETWEEN ${} AND ${}", arg + 1, arg + 2));
            arg += 2;
        }
        if filter.hall_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND hall_id = ${arg}"));
        }
        if filter.status.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND status = ${arg}"));
        }
        if filter.department.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND department = ${arg}"));
        }
        sql.push_str(" ORDER BY booking_date DESC, start_time DESC");

        let mut query = sqlx::query_as::<_, Booking>(&sql);
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            query = query.bind(start).bind(end);
        }
        if let Some(hall_id) = &filter.hall_id {
            query = query.bind(hall_id);
        }
        if let Some(status) = &filter.status {
            query = query.bind(status);
        }
        if let Some(department) = &filter.department {
            query = query.bind(department);
        }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn statistics(&self, today: NaiveDate) -> Result<BookingStatistics, AppError> {
        let total = sqlx::query("SELECT COUNT(*) as count FROM bookings")
            .fetch_one(&self.pool).await.map_err(AppError::Database)?
            .get::<i64, _>("count");

        let upcoming = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE booking_date >= $1")
            .bind(today)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?
            .get::<i64, _>("count");

        let past = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE booking_date < $1")
            .bind(today)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?
            .get::<i64, _>("count");

        let by_hall = sqlx::query_as::<_, HallBookingCount>(
            "SELECT h.name as hall_name, COUNT(b.id) as booking_count
             FROM halls h
             LEFT JOIN bookings b ON h.id = b.hall_id
             GROUP BY h.id, h.name
             ORDER BY booking_count DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let by_department = sqlx::query_as::<_, DepartmentBookingCount>(
            "SELECT department, COUNT(*) as booking_count
             FROM bookings
             GROUP BY department
             ORDER BY booking_count DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok(BookingStatistics {
            total_bookings: total,
            upcoming_bookings: upcoming,
            past_bookings: past,
            bookings_by_hall: by_hall,
            bookings_by_department: by_department,
        })
    }
}
