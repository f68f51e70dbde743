//! Pipeline analytics — stage counts and average match score per org.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use sqlx::FromRow;

use crate::candidates::handlers::OrgQuery;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct StageBucket {
    pub stage: String,
    pub count: i64,
    /// NULL until at least one candidate in the bucket has been assessed.
    pub avg_match_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PipelineAnalytics {
    pub total_candidates: i64,
    pub stages: Vec<StageBucket>,
}

/// GET /api/v1/analytics/pipeline
pub async fn handle_pipeline_analytics(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<PipelineAnalytics>, AppError> {
    let stages = sqlx::query_as::<_, StageBucket>(
        r#"
        SELECT pipeline_stage AS stage, COUNT(*) AS count, AVG(match_score) AS avg_match_score
        FROM candidates
        WHERE org_id = $1
        GROUP BY pipeline_stage
        ORDER BY pipeline_stage
        "#,
    )
    .bind(params.org_id)
    .fetch_all(&state.db)
    .await?;

    let total_candidates = stages.iter().map(|s| s.count).sum();

    Ok(Json(PipelineAnalytics {
        total_candidates,
        stages,
    }))
}
