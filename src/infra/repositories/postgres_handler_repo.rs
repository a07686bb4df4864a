use crate::domain::{models::handler::SystemHandler, ports::HandlerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresHandlerRepo {
    pool: PgPool,
}

impl PostgresHandlerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HandlerRepository for PostgresHandlerRepo {
    async fn create(&self, handler: &SystemHandler) -> Result<SystemHandler, AppError> {
        sqlx::query_as::<_, SystemHandler>(
            "INSERT INTO system_handlers (id, name, email, system_type, phone, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
            .bind(&handler.id).bind(&handler.name).bind(&handler.email)
            .bind(&handler.system_type).bind(&handler.phone).bind(handler.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SystemHandler>, AppError> {
        sqlx::query_as::<_, SystemHandler>("SELECT * FROM system_handlers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<SystemHandler>, AppError> {
        sqlx::query_as::<_, SystemHandler>("SELECT * FROM system_handlers WHERE email = $1")
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

        let owned: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        sqlx::query_as::<_, SystemHandler>(
            "SELECT * FROM system_handlers WHERE system_type = ANY($1) ORDER BY system_type, name"
        )
            .bind(&owned)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, handler: &SystemHandler) -> Result<SystemHandler, AppError> {
        sqlx::query_as::<_, SystemHandler>(
            "UPDATE system_handlers SET name=$1, email=$2, system_type=$3, phone=$4 WHERE id=$5 RETURNING *"
        )
            .bind(&handler.name).bind(&handler.email).bind(&handler.system_type)
            .bind(&handler.phone).bind(&handler.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM system_handlers WHERE id = $1")
            .bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Handler not found".into()));
        }
        Ok(())
    }
}
