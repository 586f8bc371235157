use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod api;
mod assigner;
mod config;
mod db;
mod job;
mod schema;
mod shutdown;

use crate::api::{assignment::assignment_config, health::health_config};
use crate::assigner::UpdateCicAssigner;
use crate::db::{JobStore, PgJobStore};
use crate::schema::{DirSchemaSource, SchemaSource};
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from environment
    let config::Config {
        database_url,
        schema_dir,
        max_payload_size,
        max_db_connections,
        log_dir,
    } = config::Config::from_env().expect("Failed to load configuration");

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(&log_dir).expect("Failed to create logs directory");

    // File-based logging with daily rotation and level separation, plus
    // console output. Files land as logs/info.<date>.log etc.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&log_dir, "error.log");
    let debug_file = tracing_appender::rolling::daily(&log_dir, "debug.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(debug_file)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .with(debug_layer)
        .init();

    // Database connection pool
    let pool = db::connection::get_connection(&database_url, max_db_connections)
        .await
        .expect("Failed to connect to database");

    info!("Starting job-assigner application");
    info!("Configuration loaded successfully:");
    info!("  - Schema directory: {}", schema_dir);
    info!("  - Max payload size: {} bytes", max_payload_size);
    info!("  - Max database connections: {}", max_db_connections);
    info!("Database connection pool established");

    // Run migrations on startup
    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Wire the assigner to its collaborators
    let schemas: Arc<dyn SchemaSource> = Arc::new(DirSchemaSource::new(schema_dir));
    let store: Arc<dyn JobStore> = Arc::new(PgJobStore::new(pool.clone()));
    let assigner = web::Data::new(UpdateCicAssigner::new(schemas, store.clone()));
    let store_data = web::Data::from(store);

    let server_pool = pool.clone();

    let server = HttpServer::new(move || {
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(assigner.clone())
            .app_data(store_data.clone())
            .app_data(payload_config)
            .configure(health_config)
            .configure(assignment_config)
    });

    info!("Server starting on http://127.0.0.1:8080");

    let server = server.bind(("127.0.0.1", 8080))?.run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);
    coordinator.wait_for_shutdown().await
}
