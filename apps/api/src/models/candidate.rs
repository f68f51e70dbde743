use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A sourced candidate, owned by an organization.
///
/// `availability` and `progression` are stored as free-form strings (imports
/// from sourcing tools write whatever they have); the scoring core parses them
/// with `Availability::parse` / `Progression::parse`, which never fail.
/// `match_score` is a convenience copy of the latest assessment — the
/// point-in-time truth lives in the `assessments` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub handle: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub experience_years: i32,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub pipeline_stage: String,
    pub availability: String,
    pub progression: String,
    pub salary_expectation_min: Option<i64>,
    pub culture_ratings: Vec<f64>,
    pub engagement_score: Option<f64>,
    pub match_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline stages. Transitions are free-form — recruiters move candidates
/// backwards and forwards at will, so there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Sourced,
    Contacted,
    Screening,
    Interviewing,
    Offer,
    Hired,
    Rejected,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Sourced => "sourced",
            PipelineStage::Contacted => "contacted",
            PipelineStage::Screening => "screening",
            PipelineStage::Interviewing => "interviewing",
            PipelineStage::Offer => "offer",
            PipelineStage::Hired => "hired",
            PipelineStage::Rejected => "rejected",
        }
    }

    /// Parses a stage string, e.g. from a list filter. Unlike availability and
    /// progression, the stage vocabulary is closed, so unknown values are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "sourced" => Some(PipelineStage::Sourced),
            "contacted" => Some(PipelineStage::Contacted),
            "screening" => Some(PipelineStage::Screening),
            "interviewing" => Some(PipelineStage::Interviewing),
            "offer" => Some(PipelineStage::Offer),
            "hired" => Some(PipelineStage::Hired),
            "rejected" => Some(PipelineStage::Rejected),
            _ => None,
        }
    }
}

impl Default for PipelineStage {
    fn default() -> Self {
        PipelineStage::Sourced
    }
}

/// How open a candidate is to a move right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Active,
    Passive,
    Unavailable,
    Unknown,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Active => "active",
            Availability::Passive => "passive",
            Availability::Unavailable => "unavailable",
            Availability::Unknown => "unknown",
        }
    }

    /// Total over whatever the column holds: anything unrecognized is Unknown.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "active" => Availability::Active,
            "passive" => Availability::Passive,
            "unavailable" => Availability::Unavailable,
            _ => Availability::Unknown,
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Availability::Unknown
    }
}

/// Career direction signal, recorded by sourcers or inferred from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progression {
    Ascending,
    Lateral,
    Transitioning,
    Consulting,
    Unknown,
}

impl Progression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Progression::Ascending => "ascending",
            Progression::Lateral => "lateral",
            Progression::Transitioning => "transitioning",
            Progression::Consulting => "consulting",
            Progression::Unknown => "unknown",
        }
    }

    /// Total over whatever the column holds: anything unrecognized is Unknown.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "ascending" => Progression::Ascending,
            "lateral" => Progression::Lateral,
            "transitioning" => Progression::Transitioning,
            "consulting" => Progression::Consulting,
            _ => Progression::Unknown,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Progression::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stage_round_trips_through_parse() {
        let stages = [
            PipelineStage::Sourced,
            PipelineStage::Contacted,
            PipelineStage::Screening,
            PipelineStage::Interviewing,
            PipelineStage::Offer,
            PipelineStage::Hired,
            PipelineStage::Rejected,
        ];
        for stage in stages {
            assert_eq!(PipelineStage::parse(stage.as_str()), Some(stage));
        }
    }

    #[test]
    fn test_pipeline_stage_rejects_unknown_values() {
        assert_eq!(PipelineStage::parse("on_hold"), None);
        assert_eq!(PipelineStage::parse(""), None);
    }

    #[test]
    fn test_pipeline_stage_serializes_snake_case() {
        let json = serde_json::to_string(&PipelineStage::Interviewing).unwrap();
        assert_eq!(json, "\"interviewing\"");
    }

    #[test]
    fn test_availability_parse_defaults_to_unknown() {
        assert_eq!(Availability::parse("active"), Availability::Active);
        assert_eq!(Availability::parse("  Passive "), Availability::Passive);
        assert_eq!(Availability::parse("open-to-work"), Availability::Unknown);
        assert_eq!(Availability::parse(""), Availability::Unknown);
    }

    #[test]
    fn test_progression_parse_defaults_to_unknown() {
        assert_eq!(Progression::parse("Ascending"), Progression::Ascending);
        assert_eq!(Progression::parse("freelance"), Progression::Unknown);
    }
}
