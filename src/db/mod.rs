pub mod connection;
pub mod job_store;
pub mod migrations;
pub mod models;

pub use job_store::{JobStore, JobStoreError, PgJobStore};
