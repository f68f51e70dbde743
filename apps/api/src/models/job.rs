use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An open role, owned by an organization.
///
/// `requirements` are ordered free-text strings; the scoring core matches them
/// against candidate skills by case-insensitive substring, never by taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub requirements: Vec<String>,
    pub required_experience_years: Option<i32>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub remote_allowed: bool,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}
