use crate::domain::{models::hall::Hall, ports::HallRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use chrono::{NaiveDate, NaiveTime};

pub struct SqliteHallRepo {
    pool: SqlitePool,
}

impl SqliteHallRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HallRepository for SqliteHallRepo {
    async fn create(&self, hall: &Hall) -> Result<Hall, AppError> {
        sqlx::query_as::<_, Hall>(
            "INSERT INTO halls (id, name, capacity, total_chairs, has_projector, has_sound_system, has_ac, has_stage, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&hall.id).bind(&hall.name).bind(hall.capacity).bind(hall.total_chairs)
            .bind(hall.has_projector).bind(hall.has_sound_system).bind(hall.has_ac).bind(hall.has_stage)
            .bind(hall.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Hall>, AppError> {
        sqlx::query_as::<_, Hall>("SELECT * FROM halls WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Hall>, AppError> {
        sqlx::query_as::<_, Hall>("SELECT * FROM halls WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Hall>, AppError> {
        sqlx::query_as::<_, Hall>("SELECT * FROM halls ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_available(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Vec<Hall>, AppError> {
        sqlx::query_as::<_, Hall>(
            "SELECT * FROM halls WHERE id NOT IN (
                 SELECT hall_id FROM bookings
                 WHERE booking_date = ? AND status = 'APPROVED' AND start_time < ? AND end_time > ?
             )
             ORDER BY name ASC"
        )
            .bind(date)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, hall: &Hall) -> Result<Hall, AppError> {
        sqlx::query_as::<_, Hall>(
            "UPDATE halls SET name=?, capacity=?, total_chairs=?, has_projector=?, has_sound_system=?, has_ac=?, has_stage=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&hall.name).bind(hall.capacity).bind(hall.total_chairs)
            .bind(hall.has_projector).bind(hall.has_sound_system).bind(hall.has_ac).bind(hall.has_stage)
            .bind(&hall.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let referenced = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE hall_id = ?")
            .bind(id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?
            .get::<i64, _>("count");

        if referenced > 0 {
            return Err(AppError::Conflict("Cannot delete hall with existing bookings".into()));
        }

        let result = sqlx::query("DELETE FROM halls WHERE id = ?")
            .bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Hall not found".into()));
        }
        Ok(())
    }
}
