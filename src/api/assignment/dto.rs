use serde::Serialize;

use crate::db::models::JobRow;

/// Response for an accepted update request.
///
/// Accepted covers both outcomes of a well-formed payload: a job was
/// submitted, or the payload failed schema validation and was dropped.
#[derive(Serialize)]
pub struct AssignmentAccepted {
    pub message: String,
}

/// Response listing the jobs submitted for one target database.
#[derive(Serialize)]
pub struct JobListResponse {
    pub database: String,
    pub jobs: Vec<JobRow>,
}
