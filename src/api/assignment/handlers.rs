use actix_web::{
    get, post,
    web::{Data, Path, ServiceConfig},
    HttpResponse, Responder,
};
use tracing::error;

use crate::api::validation::ErrorResponse;
use crate::assigner::UpdateCicAssigner;
use crate::db::JobStore;

use super::dto::{AssignmentAccepted, JobListResponse};

/// Accept a center-in-charge update for the target database.
///
/// The body is the raw update JSON; it is validated against the update-CIC
/// schema and, when it conforms, submitted as a job for deferred execution.
#[post("/{database}/center-incharge")]
async fn assign_update_cic(
    assigner: Data<UpdateCicAssigner>,
    path: Path<String>,
    body: String,
) -> impl Responder {
    let database = path.into_inner();

    match assigner.assign_update_cic_job(&database, &body).await {
        Ok(()) => HttpResponse::Accepted().json(AssignmentAccepted {
            message: "Center-in-charge update accepted".to_string(),
        }),
        Err(err) => {
            error!("Failed to assign update CIC job: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to assign job",
                "Could not submit the update for processing",
            ))
        }
    }
}

/// List the jobs submitted for the target database.
#[get("/{database}/jobs")]
async fn list_jobs(store: Data<dyn JobStore>, path: Path<String>) -> impl Responder {
    let database = path.into_inner();

    match store.list_for_database(&database).await {
        Ok(jobs) => HttpResponse::Ok().json(JobListResponse { database, jobs }),
        Err(err) => {
            error!("Failed to list jobs for database {}: {}", database, err);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to list jobs",
                "Database error occurred",
            ))
        }
    }
}

pub fn assignment_config(config: &mut ServiceConfig) {
    config.service(
        actix_web::web::scope("databases")
            .service(assign_update_cic)
            .service(list_jobs),
    );
}
