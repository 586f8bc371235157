use std::fmt;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::JobRow;
use crate::job::Job;

/// Errors raised by a job store backend.
#[derive(Debug)]
pub enum JobStoreError {
    /// Database operation failed
    Database(sqlx::Error),

    /// Backend rejected the operation for a non-SQL reason
    Backend(String),
}

impl fmt::Display for JobStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStoreError::Database(e) => write!(f, "database error: {}", e),
            JobStoreError::Backend(msg) => write!(f, "job store error: {}", msg),
        }
    }
}

impl std::error::Error for JobStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobStoreError::Database(e) => Some(e),
            JobStoreError::Backend(_) => None,
        }
    }
}

/// Persistence collaborator for submitted jobs.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a new job scoped to the named target database.
    async fn create(&self, database_name: &str, job: &Job) -> Result<(), JobStoreError>;

    /// List every job submitted for the named target database.
    async fn list_for_database(&self, database_name: &str) -> Result<Vec<JobRow>, JobStoreError>;
}

/// Job store backed by the Postgres `jobs` table.
pub struct PgJobStore {
    pool: Pool<Postgres>,
}

impl PgJobStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, database_name: &str, job: &Job) -> Result<(), JobStoreError> {
        debug!(
            "Creating job: job_id={}, database={}, operation={}",
            job.job_id, database_name, job.operation_type.as_str()
        );

        sqlx::query(
            r#"
            INSERT INTO jobs (job_id, database_name, operation_type, status, payload)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&job.job_id)
        .bind(database_name)
        .bind(job.operation_type.as_str())
        .bind(job.status.as_str())
        .bind(&job.payload)
        .execute(&self.pool)
        .await
        .map_err(JobStoreError::Database)?;

        debug!("Job {} persisted", job.job_id);
        Ok(())
    }

    async fn list_for_database(&self, database_name: &str) -> Result<Vec<JobRow>, JobStoreError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, job_id, database_name, operation_type, status, payload,
                   created_at, updated_at
            FROM jobs
            WHERE database_name = $1
            ORDER BY created_at
            "#,
        )
        .bind(database_name)
        .fetch_all(&self.pool)
        .await
        .map_err(JobStoreError::Database)?;

        debug!("Found {} jobs for database {}", rows.len(), database_name);
        Ok(rows)
    }
}
