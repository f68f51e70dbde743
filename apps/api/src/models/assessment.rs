use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted point-in-time assessment of a candidate against a job.
///
/// `report` holds the full serialized match report (factor breakdown,
/// strengths, risks, recommendations). `summary_source` is "model" when the
/// gateway wrote the prose and "deterministic" when the fallback did.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub score: f64,
    pub verdict: String,
    pub report: Value,
    pub summary: String,
    pub summary_source: String,
    pub created_at: DateTime<Utc>,
}
