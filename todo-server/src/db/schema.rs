//! Schema creation

use sqlx::SqlitePool;

const SCHEMA: &str = include_str!("schema.sql");

/// Create the Lists and Items tables if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("Database schema ready");
    Ok(())
}
