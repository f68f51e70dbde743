use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::candidates::handlers::OrgQuery;
use crate::errors::AppError;
use crate::jobs::store::{get_job, insert_job, list_jobs, NewJob};
use crate::models::job::JobRow;
use crate::state::AppState;

fn default_priority() -> String {
    "normal".to_string()
}

/// Request body for POST /api/v1/jobs.
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub org_id: Uuid,
    pub title: String,
    pub department: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub required_experience_years: Option<i32>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    #[serde(default)]
    pub remote_allowed: bool,
    #[serde(default = "default_priority")]
    pub priority: String,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    if matches!(req.required_experience_years, Some(years) if years < 0) {
        return Err(AppError::Validation(
            "required_experience_years must not be negative".into(),
        ));
    }

    let job = insert_job(
        &state.db,
        NewJob {
            org_id: req.org_id,
            title: req.title.trim(),
            department: req.department.as_deref(),
            requirements: &req.requirements,
            required_experience_years: req.required_experience_years,
            salary_max: req.salary_max,
            location: req.location.as_deref(),
            remote_allowed: req.remote_allowed,
            priority: &req.priority,
        },
    )
    .await?;

    info!("Created job {} for org {}", job.id, job.org_id);
    Ok(Json(job))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = list_jobs(&state.db, params.org_id).await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<JobRow>, AppError> {
    let job = get_job(&state.db, id, params.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}
