//! Strength/risk classification over factor scores.
//!
//! Thresholds are inclusive: a factor at exactly 0.8 is a strength, at exactly
//! 0.5 a risk. Lines are static per-factor templates so reports stay stable
//! across runs and diffable in review tools.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::factors::Factor;

/// A factor at or above this is called out as a strength.
pub const STRENGTH_THRESHOLD: f64 = 0.8;
/// A factor at or below this is called out as a risk.
pub const RISK_THRESHOLD: f64 = 0.5;
/// Aggregate at or above this: advance the candidate.
pub const ADVANCE_THRESHOLD: f64 = 0.75;
/// Aggregate at or above this (but below advance): proceed with checks.
pub const PROCEED_THRESHOLD: f64 = 0.55;

/// Overall call on the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Advance,
    Proceed,
    Deprioritize,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        if score >= ADVANCE_THRESHOLD {
            Verdict::Advance
        } else if score >= PROCEED_THRESHOLD {
            Verdict::Proceed
        } else {
            Verdict::Deprioritize
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Advance => "advance",
            Verdict::Proceed => "proceed",
            Verdict::Deprioritize => "deprioritize",
        }
    }
}

/// Classifier output: verdict plus the rendered strength/risk/recommendation lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub strengths: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Classifies factor scores against the named thresholds. Factors absent from
/// the map are skipped — `aggregate` has already rejected incomplete input by
/// the time reports are assembled.
pub fn classify(scores: &BTreeMap<Factor, f64>, aggregate: f64) -> Classification {
    let verdict = Verdict::from_score(aggregate);

    let mut strengths = Vec::new();
    let mut risk_factors = Vec::new();
    let mut recommendations = vec![verdict_recommendation(verdict).to_string()];

    for factor in Factor::ALL {
        let Some(value) = scores.get(&factor).copied() else {
            continue;
        };
        if value >= STRENGTH_THRESHOLD {
            strengths.push(strength_line(factor).to_string());
        } else if value <= RISK_THRESHOLD {
            risk_factors.push(risk_line(factor).to_string());
            if let Some(rec) = risk_recommendation(factor) {
                recommendations.push(rec.to_string());
            }
        }
    }

    Classification {
        verdict,
        strengths,
        risk_factors,
        recommendations,
    }
}

fn strength_line(factor: Factor) -> &'static str {
    match factor {
        Factor::TechnicalFit => "Strong technical match for the role's requirements",
        Factor::CulturalFit => "Culture signals point to a strong team fit",
        Factor::ExperienceMatch => "Experience level squarely covers the role",
        Factor::Availability => "Actively open to new opportunities",
        Factor::Communication => "Responsive and engaged in communication",
        Factor::SalaryAlignment => "Compensation expectations fit the budget",
        Factor::LocationFit => "Location works without relocation",
        Factor::CareerTrajectory => "Career trajectory is trending upward",
    }
}

fn risk_line(factor: Factor) -> &'static str {
    match factor {
        Factor::TechnicalFit => "Technical coverage of the requirements is thin",
        Factor::CulturalFit => "Weak or unknown culture fit signals",
        Factor::ExperienceMatch => "Experience falls short of the stated requirement",
        Factor::Availability => "May not be open to a move right now",
        Factor::Communication => "Little or no engagement signal to date",
        Factor::SalaryAlignment => "Compensation expectations likely exceed the budget",
        Factor::LocationFit => "Location mismatch for an on-site role",
        Factor::CareerTrajectory => "Unclear or flat career trajectory",
    }
}

/// Follow-up action for a fired risk. Trajectory has none — there is nothing
/// a recruiter can do about a flat history.
fn risk_recommendation(factor: Factor) -> Option<&'static str> {
    match factor {
        Factor::TechnicalFit => Some("Run a technical screen before investing further"),
        Factor::CulturalFit => Some("Add a values interview to the loop"),
        Factor::ExperienceMatch => Some("Weigh seniority expectations against the gap"),
        Factor::Availability => Some("Confirm active interest before proceeding"),
        Factor::Communication => Some("Try a different outreach channel"),
        Factor::SalaryAlignment => Some("Align on compensation early"),
        Factor::LocationFit => Some("Check relocation or remote flexibility upfront"),
        Factor::CareerTrajectory => None,
    }
}

fn verdict_recommendation(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Advance => "Advance to interview",
        Verdict::Proceed => "Proceed, resolving the flagged risks first",
        Verdict::Deprioritize => "Deprioritize in favor of stronger candidates",
    }
}
