use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An outreach message template with `{{placeholder}}` tokens in the body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageTemplateRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub channel: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
