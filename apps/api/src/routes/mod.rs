pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{analysis, analytics, candidates, jobs, outreach};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates
        .route(
            "/api/v1/candidates",
            post(candidates::handlers::handle_create_candidate)
                .get(candidates::handlers::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handlers::handle_get_candidate),
        )
        .route(
            "/api/v1/candidates/:id/stage",
            patch(candidates::handlers::handle_move_stage),
        )
        .route(
            "/api/v1/candidates/:id/osint",
            put(candidates::handlers::handle_upsert_osint)
                .get(candidates::handlers::handle_get_osint),
        )
        // Scoring and assessment
        .route(
            "/api/v1/candidates/:id/match",
            post(analysis::handlers::handle_match),
        )
        .route(
            "/api/v1/candidates/:id/assess",
            post(analysis::handlers::handle_assess),
        )
        .route(
            "/api/v1/candidates/:id/assessments",
            get(analysis::handlers::handle_list_assessments),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handlers::handle_create_job).get(jobs::handlers::handle_list_jobs),
        )
        .route("/api/v1/jobs/:id", get(jobs::handlers::handle_get_job))
        // Outreach
        .route(
            "/api/v1/outreach/templates",
            post(outreach::handlers::handle_create_template)
                .get(outreach::handlers::handle_list_templates),
        )
        .route(
            "/api/v1/outreach/personalize",
            post(outreach::handlers::handle_personalize),
        )
        // Analytics
        .route(
            "/api/v1/analytics/pipeline",
            get(analytics::handle_pipeline_analytics),
        )
        .with_state(state)
}
