use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// External-signal side record, at most one per candidate.
///
/// Every field is optional — enrichment sources cover candidates unevenly.
/// Numeric signals are recorded on the providers' 0–10 scale; the scoring core
/// normalizes them to [0, 1] at extraction. `availability_signal` is a raw
/// annotation surfaced to recruiters, not a scoring input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OsintProfileRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub technical_depth: Option<f64>,
    pub community_influence: Option<f64>,
    pub github_activity: Option<f64>,
    pub availability_signal: Option<String>,
    pub refreshed_at: DateTime<Utc>,
}
