//! Weighted aggregation of factor scores into a single match probability.
//!
//! The weight table is fixed and sums to 1.0 (asserted by test). A factor
//! missing from the input map is a hard error — silently scoring it as zero
//! would quietly skew every report downstream.

use std::collections::BTreeMap;

use crate::scoring::factors::Factor;
use crate::scoring::ScoringError;

/// Per-factor weights applied by `aggregate`.
#[derive(Debug, Clone, Copy)]
pub struct FactorWeights {
    pub technical_fit: f64,
    pub cultural_fit: f64,
    pub experience_match: f64,
    pub availability: f64,
    pub communication: f64,
    pub salary_alignment: f64,
    pub location_fit: f64,
    pub career_trajectory: f64,
}

/// The production weight table.
pub const WEIGHTS: FactorWeights = FactorWeights {
    technical_fit: 0.25,
    cultural_fit: 0.20,
    experience_match: 0.15,
    availability: 0.10,
    communication: 0.10,
    salary_alignment: 0.10,
    location_fit: 0.05,
    career_trajectory: 0.05,
};

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::TechnicalFit => self.technical_fit,
            Factor::CulturalFit => self.cultural_fit,
            Factor::ExperienceMatch => self.experience_match,
            Factor::Availability => self.availability,
            Factor::Communication => self.communication,
            Factor::SalaryAlignment => self.salary_alignment,
            Factor::LocationFit => self.location_fit,
            Factor::CareerTrajectory => self.career_trajectory,
        }
    }
}

/// Combines factor scores into one value: Σ factor × weight, rounded to two
/// decimals, clamped to [0, 1]. Every weighted factor must be present.
pub fn aggregate(scores: &BTreeMap<Factor, f64>) -> Result<f64, ScoringError> {
    let mut total = 0.0;
    for factor in Factor::ALL {
        let value = scores
            .get(&factor)
            .copied()
            .ok_or(ScoringError::MissingFactor(factor))?;
        total += value * WEIGHTS.get(factor);
    }
    Ok(round2(total).clamp(0.0, 1.0))
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
