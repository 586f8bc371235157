use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job status enum representing the state of a job.
///
/// A job is always `New` when it leaves this service; every later transition
/// is performed by the external job processor.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    New,
    Processing,
    Success,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::New => "new",
            JobStatus::Processing => "processing",
            JobStatus::Success => "success",
            JobStatus::Failed => "failed",
        }
    }
}

/// Kind of update a job carries. This service only submits `UpdateCic`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    UpdateCic,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::UpdateCic => "UPDATE_CIC",
        }
    }
}

/// One unit of deferred work, handed to the job store for later execution.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    /// Generated once at construction, never reassigned.
    pub job_id: String,
    pub operation_type: OperationType,
    pub status: JobStatus,
    /// The validated request JSON, kept verbatim so the processor sees
    /// exactly what the caller sent.
    pub payload: String,
}

impl Job {
    /// Build a job for a payload that already passed schema validation.
    pub fn new(operation_type: OperationType, payload: String) -> Self {
        Job {
            job_id: Uuid::new_v4().to_string(),
            operation_type,
            status: JobStatus::New,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_starts_in_new_status_with_a_fresh_id() {
        let job = Job::new(OperationType::UpdateCic, "{}".to_string());

        assert_eq!(job.status, JobStatus::New);
        assert_eq!(job.operation_type, OperationType::UpdateCic);
        assert!(!job.job_id.is_empty());
        assert!(Uuid::parse_str(&job.job_id).is_ok());
        assert_eq!(job.payload, "{}");
    }

    #[test]
    fn job_ids_are_unique_across_constructions() {
        let a = Job::new(OperationType::UpdateCic, "{}".to_string());
        let b = Job::new(OperationType::UpdateCic, "{}".to_string());
        assert_ne!(a.job_id, b.job_id);
    }

    #[test]
    fn status_and_operation_type_map_to_stable_strings() {
        assert_eq!(JobStatus::New.as_str(), "new");
        assert_eq!(JobStatus::Failed.as_str(), "failed");
        assert_eq!(OperationType::UpdateCic.as_str(), "UPDATE_CIC");
    }
}
