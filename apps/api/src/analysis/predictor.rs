//! Assessment pipeline — score, summarize, persist, write back.
//!
//! Flow: score_candidate → summary (model with fallback, or deterministic
//! when not requested) → INSERT assessments → UPDATE candidates.match_score.
//!
//! The assessments table is the point-in-time truth; `match_score` on the
//! candidate row is a convenience copy for list views and analytics.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::insights::{deterministic_summary, summarize, SOURCE_DETERMINISTIC};
use crate::errors::AppError;
use crate::llm_client::ModelGateway;
use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;
use crate::models::osint::OsintProfileRow;
use crate::scoring::{score_candidate, MatchReport};

/// Request body for POST /api/v1/candidates/:id/assess.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessRequest {
    pub org_id: Uuid,
    pub job_id: Uuid,
    /// Ask the model for prose. Falls back to the deterministic summary on
    /// any gateway failure — an assessment never fails because of the model.
    #[serde(default)]
    pub include_summary: bool,
}

/// Response from the assessment pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct AssessResponse {
    pub assessment_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub score: f64,
    pub score_percent: u32,
    pub report: MatchReport,
    pub summary: String,
    pub summary_source: String,
}

/// Runs the full assessment pipeline and persists the result.
pub async fn run_assessment(
    pool: &PgPool,
    gateway: &dyn ModelGateway,
    candidate: &CandidateRow,
    job: &JobRow,
    osint: Option<&OsintProfileRow>,
    include_summary: bool,
) -> Result<AssessResponse, AppError> {
    let report = score_candidate(candidate, job, osint)?;
    info!(
        "Scored candidate {} against job {}: {:.2} ({})",
        candidate.id,
        job.id,
        report.score,
        report.verdict.as_str()
    );

    let (summary, summary_source) = if include_summary {
        let outcome = summarize(gateway, &report, candidate, job).await;
        (outcome.text, outcome.source)
    } else {
        (
            deterministic_summary(&report, candidate, job),
            SOURCE_DETERMINISTIC,
        )
    };

    let report_value = serde_json::to_value(&report).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize match report: {e}"))
    })?;

    let assessment_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO assessments
            (id, org_id, candidate_id, job_id, score, verdict, report, summary, summary_source)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(assessment_id)
    .bind(candidate.org_id)
    .bind(candidate.id)
    .bind(job.id)
    .bind(report.score)
    .bind(report.verdict.as_str())
    .bind(&report_value)
    .bind(&summary)
    .bind(summary_source)
    .execute(pool)
    .await?;

    sqlx::query("UPDATE candidates SET match_score = $1, updated_at = NOW() WHERE id = $2")
        .bind(report.score)
        .bind(candidate.id)
        .execute(pool)
        .await?;

    info!(
        "Persisted assessment {assessment_id} for candidate {} (summary: {summary_source})",
        candidate.id
    );

    Ok(AssessResponse {
        assessment_id,
        candidate_id: candidate.id,
        job_id: job.id,
        score: report.score,
        score_percent: report.score_percent(),
        report,
        summary,
        summary_source: summary_source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_request_summary_defaults_off() {
        let json = serde_json::json!({
            "org_id": Uuid::new_v4(),
            "job_id": Uuid::new_v4(),
        });
        let req: AssessRequest = serde_json::from_value(json).unwrap();
        assert!(!req.include_summary);
    }

    #[test]
    fn test_assess_response_serializes_report_inline() {
        use crate::scoring::classify::Verdict;

        let response = AssessResponse {
            assessment_id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            score: 0.64,
            score_percent: 64,
            report: MatchReport {
                score: 0.64,
                verdict: Verdict::Proceed,
                factors: vec![],
                strengths: vec![],
                risk_factors: vec![],
                recommendations: vec![],
            },
            summary: "ok".to_string(),
            summary_source: "deterministic".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["report"]["verdict"], "proceed");
        assert_eq!(value["score_percent"], 64);
    }
}
