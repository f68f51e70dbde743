//! Axum route handlers for the Analysis API.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::predictor::{run_assessment, AssessRequest, AssessResponse};
use crate::candidates::handlers::OrgQuery;
use crate::candidates::store::{get_candidate, get_osint_profile};
use crate::errors::AppError;
use crate::jobs::store::get_job;
use crate::models::assessment::AssessmentRow;
use crate::scoring::{score_candidate, MatchReport};
use crate::state::AppState;

/// Request body for POST /api/v1/candidates/:id/match.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub org_id: Uuid,
    pub job_id: Uuid,
}

/// Scoring result without persistence — a dry run of the assessment.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub score: f64,
    pub score_percent: u32,
    pub report: MatchReport,
}

/// POST /api/v1/candidates/:id/match
///
/// Scores a candidate against a job and returns the full report. Nothing is
/// written and the model gateway is never involved.
pub async fn handle_match(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let candidate = get_candidate(&state.db, candidate_id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    let job = get_job(&state.db, req.job_id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.job_id)))?;
    let osint = get_osint_profile(&state.db, candidate_id).await?;

    let report = score_candidate(&candidate, &job, osint.as_ref())?;

    Ok(Json(MatchResponse {
        candidate_id,
        job_id: job.id,
        score: report.score,
        score_percent: report.score_percent(),
        report,
    }))
}

/// POST /api/v1/candidates/:id/assess
///
/// Full pipeline: score, summarize, persist the assessment, and write the
/// score back onto the candidate row.
pub async fn handle_assess(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(req): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, AppError> {
    let candidate = get_candidate(&state.db, candidate_id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    let job = get_job(&state.db, req.job_id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.job_id)))?;
    let osint = get_osint_profile(&state.db, candidate_id).await?;

    let response = run_assessment(
        &state.db,
        state.gateway.as_ref(),
        &candidate,
        &job,
        osint.as_ref(),
        req.include_summary,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/candidates/:id/assessments
///
/// Returns the candidate's assessment history, newest first. Each row is the
/// point-in-time truth; `candidates.match_score` only mirrors the latest one.
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    get_candidate(&state.db, candidate_id, params.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let assessments = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE candidate_id = $1 AND org_id = $2 ORDER BY created_at DESC",
    )
    .bind(candidate_id)
    .bind(params.org_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(assessments))
}
