use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::db::{JobStore, JobStoreError};
use crate::job::{Job, OperationType};
use crate::schema::{validate_against_schema, SchemaSource, ValidationError};

/// Resource name of the schema that update-CIC payloads must satisfy.
pub const UPDATE_CIC_SCHEMA: &str = "update_cic.schema.json";

/// The single error kind callers of the assigner see.
///
/// Every internal failure — schema acquisition, validation evaluation, job
/// persistence — is wrapped here with its cause preserved. A payload that is
/// well-formed JSON but fails schema validation is not an error at all: the
/// call is a no-op (see [`UpdateCicAssigner::assign_update_cic_job`]).
#[derive(Debug)]
pub enum AssignerError {
    /// The schema resource could not be opened.
    SchemaUnavailable { name: &'static str, source: std::io::Error },

    /// The schema or the payload could not be evaluated.
    Validation(ValidationError),

    /// The job store rejected the new job.
    Store(JobStoreError),
}

impl fmt::Display for AssignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignerError::SchemaUnavailable { name, source } => {
                write!(f, "unable to assign UPDATE_CIC job, schema {} unavailable: {}", name, source)
            }
            AssignerError::Validation(e) => {
                write!(f, "unable to assign UPDATE_CIC job, validation failed: {}", e)
            }
            AssignerError::Store(e) => {
                write!(f, "unable to assign UPDATE_CIC job, job store failed: {}", e)
            }
        }
    }
}

impl std::error::Error for AssignerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssignerError::SchemaUnavailable { source, .. } => Some(source),
            AssignerError::Validation(e) => Some(e),
            AssignerError::Store(e) => Some(e),
        }
    }
}

/// Assigns jobs that update center-in-charge details on the rating forms
/// stored in a target reporting database.
///
/// The assigner validates each payload against the update-CIC schema and, on
/// success, hands a freshly built [`Job`] to the injected [`JobStore`]. It
/// keeps no state of its own, so concurrent calls are independent.
pub struct UpdateCicAssigner {
    schemas: Arc<dyn SchemaSource>,
    store: Arc<dyn JobStore>,
}

impl UpdateCicAssigner {
    pub fn new(schemas: Arc<dyn SchemaSource>, store: Arc<dyn JobStore>) -> Self {
        Self { schemas, store }
    }

    /// Assign a job that updates center-in-charge details for rating forms
    /// in the named target database.
    ///
    /// A payload that fails schema validation is dropped without a job and
    /// without an error; only the warn-level log records it. Any other
    /// failure raises [`AssignerError`] and creates no job.
    pub async fn assign_update_cic_job(
        &self,
        database_name: &str,
        json: &str,
    ) -> Result<(), AssignerError> {
        let schema = self.schemas.open(UPDATE_CIC_SCHEMA).map_err(|e| {
            error!("Schema {} could not be opened: {}", UPDATE_CIC_SCHEMA, e);
            AssignerError::SchemaUnavailable { name: UPDATE_CIC_SCHEMA, source: e }
        })?;

        let valid = validate_against_schema(json, schema).map_err(|e| {
            error!("Unable to evaluate update CIC payload: {}", e);
            AssignerError::Validation(e)
        })?;
        debug!("Update CIC payload valid: {}", valid);

        if !valid {
            warn!(
                "Update CIC payload for database {} failed schema validation, no job assigned",
                database_name
            );
            return Ok(());
        }

        let job = Job::new(OperationType::UpdateCic, json.to_owned());
        debug!("Created job {} for database {}", job.job_id, database_name);

        self.store.create(database_name, &job).await.map_err(|e| {
            error!("Unable to assign UPDATE_CIC job {}: {}", job.job_id, e);
            AssignerError::Store(e)
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Cursor, Read};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::db::models::JobRow;
    use crate::db::{JobStore, JobStoreError};
    use crate::job::Job;
    use crate::schema::SchemaSource;

    /// Schema source serving one fixed document from memory.
    pub struct FixedSchemaSource(pub &'static str);

    impl SchemaSource for FixedSchemaSource {
        fn open(&self, _name: &str) -> io::Result<Box<dyn Read + Send>> {
            Ok(Box::new(Cursor::new(self.0.as_bytes())))
        }
    }

    /// Schema source whose lookups always fail.
    pub struct MissingSchemaSource;

    impl SchemaSource for MissingSchemaSource {
        fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send>> {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("schema {} not found", name),
            ))
        }
    }

    /// Job store recording every created job in memory.
    #[derive(Default)]
    pub struct MemoryJobStore {
        pub created: Mutex<Vec<(String, Job)>>,
        pub fail: bool,
    }

    #[async_trait]
    impl JobStore for MemoryJobStore {
        async fn create(&self, database_name: &str, job: &Job) -> Result<(), JobStoreError> {
            if self.fail {
                return Err(JobStoreError::Backend("store offline".to_string()));
            }
            self.created
                .lock()
                .unwrap()
                .push((database_name.to_string(), job.clone()));
            Ok(())
        }

        async fn list_for_database(
            &self,
            _database_name: &str,
        ) -> Result<Vec<JobRow>, JobStoreError> {
            Ok(Vec::new())
        }
    }

    pub const UPDATE_CIC_SCHEMA_DOC: &str = r#"{
        "type": "object",
        "properties": {
            "centerInchargeId": {"type": "string", "minLength": 1},
            "ratingFormIds": {"type": "array", "items": {"type": "string"}, "minItems": 1}
        },
        "required": ["centerInchargeId", "ratingFormIds"]
    }"#;
}
