use crate::domain::{models::handler::SystemHandler, ports::HandlerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHandlerRepo {
    pool: SqlitePool,
}

impl SqliteHandlerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HandlerRepository for SqliteHandlerRepo {
    async fn create(&self, handler: &SystemHandler) -> Result<SystemHandler, AppError> {
        sqlx::query_as::<_, SystemHandler>(
            "INSERT INTO system_handlers (id, name, email, system_type, phone, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&handler.id).bind(&handler.name).bind(&handler.email)
            .bind(&handler.system_type).bind(&handler.phone).bind(handler.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SystemHandler>, AppError> {
        sqlx::query_as::<_, SystemHandler>("SELECT * FROM system_handlers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<SystemHandler>, AppError> {
        sqlx::query_as::<_, SystemHandler>("SELECT * FROM system_handlers WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<SystemHandler>, AppError> {
        sqlx::query_as::<_, SystemHandler>("SELECT * FROM system_handlers ORDER BY system_type, name")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_system_types(&self, types: &[&str]) -> Result<Vec<SystemHandler>, AppError> {
        if types.is_empty() {
            return Ok(vec![]);
        }

        let placeholders = vec!["?"; types.len()].join(", ");
        let sql = format!(
            "SELECT * FROM system_handlers WHERE system_type IN ({placeholders}) ORDER BY system_type, name"
        );

        let mut query = sqlx::query_as::<_, SystemHandler>(&sql);
        for system_type in types {
            query = query.bind(*system_type);
        }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, handler: &SystemHandler) -> Result<SystemHandler, AppError> {
        sqlx::query_as::<_, SystemHandler>(
            "UPDATE system_handlers SET name=?, email=?, system_type=?, phone=? WHERE id=? RETURNING *"
        )
            .bind(&handler.name).bind(&handler.email).bind(&handler.system_type)
            .bind(&handler.phone).bind(&handler.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM system_handlers WHERE id = ?")
            .bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Handler not found".into()));
        }
        Ok(())
    }
}
