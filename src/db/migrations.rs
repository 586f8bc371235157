use sqlx::{Pool, Postgres};
use tracing::info;

/// Run all pending database migrations.
///
/// The SQL files under migrations/ are embedded at compile time; running
/// this repeatedly is safe because sqlx tracks applied migrations.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed");
    Ok(())
}
