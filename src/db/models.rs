use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a submitted job with all fields.
#[derive(Debug, FromRow, Serialize)]
pub struct JobRow {
    pub id: i64,
    pub job_id: String,
    pub database_name: String,
    pub operation_type: String,
    pub status: String,
    pub payload: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
