//! Candidate scoring — deterministic, explainable match scores.
//!
//! Pipeline: factor extraction (`factors`) → weighted aggregation (`aggregate`)
//! → strength/risk classification (`classify`). Everything in this module is
//! pure; handlers own all I/O. Scores are canonically f64 in [0, 1] — the
//! 0–100 display form exists only at the API response boundary, via
//! `MatchReport::score_percent`.

pub mod aggregate;
pub mod classify;
pub mod factors;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;
use crate::models::osint::OsintProfileRow;
use crate::scoring::aggregate::WEIGHTS;
use crate::scoring::classify::Verdict;
use crate::scoring::factors::Factor;

/// Scoring failures. Extractors are total and never fail; the only declared
/// failure is a factor missing from the aggregation input, which is a bug in
/// the caller, not a property of the candidate.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Factor '{0}' missing from aggregation input")]
    MissingFactor(Factor),
}

/// One row of the factor breakdown in a match report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub factor: Factor,
    pub label: String,
    pub score: f64,
    pub weight: f64,
    pub evidence: String,
}

/// Full deterministic match report for a candidate against a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Canonical aggregate in [0, 1], rounded to two decimals.
    pub score: f64,
    pub verdict: Verdict,
    pub factors: Vec<FactorBreakdown>,
    pub strengths: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

impl MatchReport {
    /// The 0–100 display form. This is the only place it is produced.
    pub fn score_percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}

/// Scores a candidate against a job: extract → aggregate → classify.
pub fn score_candidate(
    candidate: &CandidateRow,
    job: &JobRow,
    osint: Option<&OsintProfileRow>,
) -> Result<MatchReport, ScoringError> {
    let extracted = factors::extract_all(candidate, job, osint);
    let values: BTreeMap<Factor, f64> =
        extracted.iter().map(|(f, s)| (*f, s.value)).collect();

    let score = aggregate::aggregate(&values)?;
    let classification = classify::classify(&values, score);

    let factors = extracted
        .into_iter()
        .map(|(factor, fs)| FactorBreakdown {
            factor,
            label: factor.label().to_string(),
            score: fs.value,
            weight: WEIGHTS.get(factor),
            evidence: fs.evidence,
        })
        .collect();

    Ok(MatchReport {
        score,
        verdict: classification.verdict,
        factors,
        strengths: classification.strengths,
        risk_factors: classification.risk_factors,
        recommendations: classification.recommendations,
    })
}
