use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::candidates::store::{
    get_candidate, get_osint_profile, insert_candidate, list_candidates, update_stage,
    upsert_osint_profile, NewCandidate, OsintUpdate,
};
use crate::errors::AppError;
use crate::models::candidate::{Availability, CandidateRow, PipelineStage, Progression};
use crate::models::osint::OsintProfileRow;
use crate::state::AppState;

/// Org scoping for list endpoints. Every read in the API is org-scoped.
#[derive(Deserialize)]
pub struct OrgQuery {
    pub org_id: Uuid,
}

#[derive(Deserialize)]
pub struct CandidateListQuery {
    pub org_id: Uuid,
    pub stage: Option<String>,
}

/// Request body for POST /api/v1/candidates.
///
/// Availability and progression are typed here so the API rejects values
/// outside the vocabulary; bulk imports that bypass the API may still write
/// free-form strings, which scoring tolerates.
#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub org_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub handle: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub experience_years: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub pipeline_stage: PipelineStage,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub progression: Progression,
    pub salary_expectation_min: Option<i64>,
    #[serde(default)]
    pub culture_ratings: Vec<f64>,
    pub engagement_score: Option<f64>,
}

fn validate_new_candidate(req: &CreateCandidateRequest) -> Result<(), AppError> {
    if req.full_name.trim().is_empty() {
        return Err(AppError::Validation("full_name must not be empty".into()));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation(
            "email must be a valid address".into(),
        ));
    }
    if req.experience_years < 0 {
        return Err(AppError::Validation(
            "experience_years must not be negative".into(),
        ));
    }
    if req.culture_ratings.iter().any(|r| !(0.0..=1.0).contains(r)) {
        return Err(AppError::Validation(
            "culture_ratings must be between 0.0 and 1.0".into(),
        ));
    }
    if let Some(score) = req.engagement_score {
        if !(0.0..=100.0).contains(&score) {
            return Err(AppError::Validation(
                "engagement_score must be between 0 and 100".into(),
            ));
        }
    }
    Ok(())
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(req): Json<CreateCandidateRequest>,
) -> Result<Json<CandidateRow>, AppError> {
    validate_new_candidate(&req)?;

    let candidate = insert_candidate(
        &state.db,
        NewCandidate {
            org_id: req.org_id,
            full_name: req.full_name.trim(),
            email: req.email.trim(),
            handle: req.handle.as_deref(),
            title: req.title.as_deref(),
            company: req.company.as_deref(),
            location: req.location.as_deref(),
            experience_years: req.experience_years,
            skills: &req.skills,
            pipeline_stage: req.pipeline_stage.as_str(),
            availability: req.availability.as_str(),
            progression: req.progression.as_str(),
            salary_expectation_min: req.salary_expectation_min,
            culture_ratings: &req.culture_ratings,
            engagement_score: req.engagement_score,
        },
    )
    .await?;

    info!(
        "Created candidate {} for org {}",
        candidate.id, candidate.org_id
    );
    Ok(Json(candidate))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateListQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let stage = match params.stage.as_deref() {
        Some(raw) => Some(
            PipelineStage::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown pipeline stage: {raw}")))?,
        ),
        None => None,
    };

    let candidates =
        list_candidates(&state.db, params.org_id, stage.map(|s| s.as_str())).await?;
    Ok(Json(candidates))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = get_candidate(&state.db, id, params.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

#[derive(Debug, Deserialize)]
pub struct StageMoveRequest {
    pub org_id: Uuid,
    pub stage: PipelineStage,
}

/// PATCH /api/v1/candidates/:id/stage
pub async fn handle_move_stage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StageMoveRequest>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = update_stage(&state.db, id, req.org_id, req.stage.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    info!("Moved candidate {id} to stage {}", req.stage.as_str());
    Ok(Json(candidate))
}

/// Request body for PUT /api/v1/candidates/:id/osint. All signals are on a
/// 0–10 scale, as produced by the enrichment pipeline.
#[derive(Debug, Deserialize)]
pub struct OsintUpsertRequest {
    pub org_id: Uuid,
    pub technical_depth: Option<f64>,
    pub community_influence: Option<f64>,
    pub github_activity: Option<f64>,
    pub availability_signal: Option<String>,
}

fn validate_osint_ranges(req: &OsintUpsertRequest) -> Result<(), AppError> {
    let signals = [
        ("technical_depth", req.technical_depth),
        ("community_influence", req.community_influence),
        ("github_activity", req.github_activity),
    ];
    for (name, value) in signals {
        if let Some(v) = value {
            if !(0.0..=10.0).contains(&v) {
                return Err(AppError::Validation(format!(
                    "{name} must be between 0 and 10"
                )));
            }
        }
    }
    Ok(())
}

/// PUT /api/v1/candidates/:id/osint
pub async fn handle_upsert_osint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OsintUpsertRequest>,
) -> Result<Json<OsintProfileRow>, AppError> {
    validate_osint_ranges(&req)?;

    get_candidate(&state.db, id, req.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let profile = upsert_osint_profile(
        &state.db,
        id,
        OsintUpdate {
            technical_depth: req.technical_depth,
            community_influence: req.community_influence,
            github_activity: req.github_activity,
            availability_signal: req.availability_signal.as_deref(),
        },
    )
    .await?;

    info!("Refreshed OSINT profile for candidate {id}");
    Ok(Json(profile))
}

/// GET /api/v1/candidates/:id/osint
pub async fn handle_get_osint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<OsintProfileRow>, AppError> {
    get_candidate(&state.db, id, params.org_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let profile = get_osint_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No OSINT profile for candidate {id}")))?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCandidateRequest {
        serde_json::from_value(serde_json::json!({
            "org_id": Uuid::new_v4(),
            "full_name": "Dana Velasquez",
            "email": "dana@example.com",
        }))
        .unwrap()
    }

    #[test]
    fn test_create_request_applies_defaults() {
        let req = valid_request();
        assert_eq!(req.pipeline_stage, PipelineStage::Sourced);
        assert_eq!(req.availability, Availability::Unknown);
        assert_eq!(req.progression, Progression::Unknown);
        assert_eq!(req.experience_years, 0);
        assert!(req.skills.is_empty());
        assert!(req.culture_ratings.is_empty());
    }

    #[test]
    fn test_create_request_rejects_unknown_availability() {
        let result: Result<CreateCandidateRequest, _> =
            serde_json::from_value(serde_json::json!({
                "org_id": Uuid::new_v4(),
                "full_name": "Dana Velasquez",
                "email": "dana@example.com",
                "availability": "open-to-work",
            }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_valid_request() {
        assert!(validate_new_candidate(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut req = valid_request();
        req.full_name = "   ".to_string();
        assert!(validate_new_candidate(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let mut req = valid_request();
        req.email = "dana.example.com".to_string();
        assert!(validate_new_candidate(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_experience() {
        let mut req = valid_request();
        req.experience_years = -1;
        assert!(validate_new_candidate(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_culture_rating() {
        let mut req = valid_request();
        req.culture_ratings = vec![0.4, 1.5];
        assert!(validate_new_candidate(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_engagement() {
        let mut req = valid_request();
        req.engagement_score = Some(150.0);
        assert!(validate_new_candidate(&req).is_err());
    }

    #[test]
    fn test_osint_ranges_are_zero_to_ten() {
        let req = OsintUpsertRequest {
            org_id: Uuid::new_v4(),
            technical_depth: Some(7.5),
            community_influence: None,
            github_activity: Some(10.0),
            availability_signal: None,
        };
        assert!(validate_osint_ranges(&req).is_ok());

        let req = OsintUpsertRequest {
            technical_depth: Some(10.1),
            ..req
        };
        assert!(validate_osint_ranges(&req).is_err());
    }
}
