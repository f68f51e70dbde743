//! Factor extraction — one sub-score per scoring dimension.
//!
//! Every extractor is a pure function over the candidate (plus the job and the
//! optional OSINT profile), returns a value in [0, 1], and degrades to a
//! documented default when its input is missing. `extract_all` is the single
//! entry point: match reports, assessments, and analytics all share these
//! formulas instead of re-deriving them per call site.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::candidate::{Availability, CandidateRow, Progression};
use crate::models::job::JobRow;
use crate::models::osint::OsintProfileRow;

/// Sub-score used when a dimension has no signal either way.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Experience years beyond this add no technical-fit bonus.
const EXPERIENCE_BONUS_CAP_YEARS: i32 = 10;
/// Technical-fit bonus per year of experience below the cap.
const EXPERIENCE_BONUS_PER_YEAR: f64 = 0.01;
/// Weight of the OSINT technical-depth signal inside technical fit.
const OSINT_DEPTH_BONUS_WEIGHT: f64 = 0.1;
/// Experience at 1.5× the stated requirement earns a full experience match.
const EXPERIENCE_STRETCH: f64 = 1.5;

// ────────────────────────────────────────────────────────────────────────────
// Factor identity
// ────────────────────────────────────────────────────────────────────────────

/// The eight scoring dimensions, in report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    TechnicalFit,
    CulturalFit,
    ExperienceMatch,
    Availability,
    Communication,
    SalaryAlignment,
    LocationFit,
    CareerTrajectory,
}

impl Factor {
    pub const ALL: [Factor; 8] = [
        Factor::TechnicalFit,
        Factor::CulturalFit,
        Factor::ExperienceMatch,
        Factor::Availability,
        Factor::Communication,
        Factor::SalaryAlignment,
        Factor::LocationFit,
        Factor::CareerTrajectory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::TechnicalFit => "technical_fit",
            Factor::CulturalFit => "cultural_fit",
            Factor::ExperienceMatch => "experience_match",
            Factor::Availability => "availability",
            Factor::Communication => "communication",
            Factor::SalaryAlignment => "salary_alignment",
            Factor::LocationFit => "location_fit",
            Factor::CareerTrajectory => "career_trajectory",
        }
    }

    /// Human-facing label used in report strings.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::TechnicalFit => "Technical fit",
            Factor::CulturalFit => "Cultural fit",
            Factor::ExperienceMatch => "Experience match",
            Factor::Availability => "Availability",
            Factor::Communication => "Communication",
            Factor::SalaryAlignment => "Salary alignment",
            Factor::LocationFit => "Location fit",
            Factor::CareerTrajectory => "Career trajectory",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted sub-score plus the evidence string justifying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorScore {
    pub value: f64,
    pub evidence: String,
}

impl FactorScore {
    fn new(value: f64, evidence: impl Into<String>) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            evidence: evidence.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractors
// ────────────────────────────────────────────────────────────────────────────

/// Technical fit: requirement coverage plus small experience and OSINT bonuses.
/// Neutral base when the job lists no requirements.
pub fn technical_fit(
    candidate: &CandidateRow,
    job: &JobRow,
    osint: Option<&OsintProfileRow>,
) -> FactorScore {
    let (base, coverage) = if job.requirements.is_empty() {
        (NEUTRAL_SCORE, "no requirements listed".to_string())
    } else {
        let matched = job
            .requirements
            .iter()
            .filter(|req| skill_covers(&candidate.skills, req))
            .count();
        (
            matched as f64 / job.requirements.len() as f64,
            format!("{matched}/{} requirements covered", job.requirements.len()),
        )
    };

    let capped_years = candidate.experience_years.clamp(0, EXPERIENCE_BONUS_CAP_YEARS);
    let experience_bonus = capped_years as f64 * EXPERIENCE_BONUS_PER_YEAR;

    let depth_bonus = osint
        .and_then(|p| p.technical_depth)
        .map(|depth| (depth / 10.0).clamp(0.0, 1.0) * OSINT_DEPTH_BONUS_WEIGHT)
        .unwrap_or(0.0);

    FactorScore::new(
        base + experience_bonus + depth_bonus,
        format!("{coverage}; +{experience_bonus:.2} experience, +{depth_bonus:.2} OSINT depth"),
    )
}

/// Case-insensitive substring match in either direction.
/// "react" covers "React experience"; "React Native" covers "react".
fn skill_covers(skills: &[String], requirement: &str) -> bool {
    let req = requirement.trim().to_lowercase();
    if req.is_empty() {
        return false;
    }
    skills.iter().any(|skill| {
        let skill = skill.trim().to_lowercase();
        !skill.is_empty() && (skill.contains(&req) || req.contains(&skill))
    })
}

/// Cultural fit: mean of recorded culture ratings, then OSINT community
/// influence, then neutral.
pub fn cultural_fit(candidate: &CandidateRow, osint: Option<&OsintProfileRow>) -> FactorScore {
    if !candidate.culture_ratings.is_empty() {
        let mean = candidate.culture_ratings.iter().sum::<f64>()
            / candidate.culture_ratings.len() as f64;
        return FactorScore::new(
            mean,
            format!(
                "mean of {} recorded culture ratings",
                candidate.culture_ratings.len()
            ),
        );
    }
    if let Some(influence) = osint.and_then(|p| p.community_influence) {
        return FactorScore::new(
            influence / 10.0,
            format!("OSINT community influence {influence:.1}/10"),
        );
    }
    FactorScore::new(NEUTRAL_SCORE, "no culture signal recorded")
}

/// Experience match: proportional until experience reaches 1.5× the stated
/// requirement, full from there on. Trivially satisfied when the job states
/// no requirement.
pub fn experience_match(candidate: &CandidateRow, job: &JobRow) -> FactorScore {
    let required = match job.required_experience_years {
        Some(years) if years > 0 => years,
        _ => return FactorScore::new(1.0, "no experience requirement stated"),
    };
    let ratio =
        candidate.experience_years.max(0) as f64 / (EXPERIENCE_STRETCH * required as f64);
    FactorScore::new(
        ratio.min(1.0),
        format!(
            "{} years vs {required} required",
            candidate.experience_years
        ),
    )
}

/// Availability: categorical mapping over the recorded signal.
pub fn availability(candidate: &CandidateRow) -> FactorScore {
    let parsed = Availability::parse(&candidate.availability);
    let value = match parsed {
        Availability::Active => 1.0,
        Availability::Passive => 0.7,
        Availability::Unavailable => 0.2,
        Availability::Unknown => NEUTRAL_SCORE,
    };
    FactorScore::new(value, format!("availability: {}", parsed.as_str()))
}

/// Communication: outreach engagement when tracked, then OSINT GitHub
/// activity, then neutral.
pub fn communication(candidate: &CandidateRow, osint: Option<&OsintProfileRow>) -> FactorScore {
    if let Some(engagement) = candidate.engagement_score {
        return FactorScore::new(
            engagement / 100.0,
            format!("outreach engagement {engagement:.0}/100"),
        );
    }
    if let Some(activity) = osint.and_then(|p| p.github_activity) {
        return FactorScore::new(
            activity / 10.0,
            format!("GitHub activity {activity:.1}/10"),
        );
    }
    FactorScore::new(NEUTRAL_SCORE, "no communication signal recorded")
}

/// Salary alignment: budget over expectation, capped at full alignment.
/// Neutral when either side is missing or the expectation is zero.
pub fn salary_alignment(candidate: &CandidateRow, job: &JobRow) -> FactorScore {
    let (expectation, budget) = match (candidate.salary_expectation_min, job.salary_max) {
        (Some(expectation), Some(budget)) if expectation > 0 => (expectation, budget),
        _ => return FactorScore::new(NEUTRAL_SCORE, "salary expectation or budget missing"),
    };
    let ratio = budget as f64 / expectation as f64;
    FactorScore::new(
        ratio.min(1.0),
        format!("budget {budget} vs expectation {expectation}"),
    )
}

/// Location fit. Missing data is checked first: a candidate with no recorded
/// location is neutral, never penalized, even for remote-friendly roles.
pub fn location_fit(candidate: &CandidateRow, job: &JobRow) -> FactorScore {
    let (candidate_loc, job_loc) = match (candidate.location.as_deref(), job.location.as_deref())
    {
        (Some(c), Some(j)) if !c.trim().is_empty() && !j.trim().is_empty() => (c, j),
        _ => return FactorScore::new(NEUTRAL_SCORE, "location missing on one side"),
    };
    let c = candidate_loc.to_lowercase();
    let j = job_loc.to_lowercase();
    if c.contains(&j) || j.contains(&c) {
        return FactorScore::new(1.0, format!("location match: {candidate_loc}"));
    }
    if job.remote_allowed {
        return FactorScore::new(0.8, "no co-location, but the role allows remote");
    }
    FactorScore::new(0.3, format!("{candidate_loc} vs on-site {job_loc}"))
}

/// Career trajectory: categorical mapping over the recorded progression.
pub fn career_trajectory(candidate: &CandidateRow) -> FactorScore {
    let parsed = Progression::parse(&candidate.progression);
    let value = match parsed {
        Progression::Ascending => 0.9,
        Progression::Lateral => 0.7,
        Progression::Transitioning => 0.6,
        Progression::Consulting => NEUTRAL_SCORE,
        Progression::Unknown => NEUTRAL_SCORE,
    };
    FactorScore::new(value, format!("progression: {}", parsed.as_str()))
}

/// Runs every extractor. Callers that need factor scores go through here —
/// never through individual extractors — so the factor set stays consistent.
pub fn extract_all(
    candidate: &CandidateRow,
    job: &JobRow,
    osint: Option<&OsintProfileRow>,
) -> BTreeMap<Factor, FactorScore> {
    let mut scores = BTreeMap::new();
    scores.insert(Factor::TechnicalFit, technical_fit(candidate, job, osint));
    scores.insert(Factor::CulturalFit, cultural_fit(candidate, osint));
    scores.insert(Factor::ExperienceMatch, experience_match(candidate, job));
    scores.insert(Factor::Availability, availability(candidate));
    scores.insert(Factor::Communication, communication(candidate, osint));
    scores.insert(Factor::SalaryAlignment, salary_alignment(candidate, job));
    scores.insert(Factor::LocationFit, location_fit(candidate, job));
    scores.insert(Factor::CareerTrajectory, career_trajectory(candidate));
    scores
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    const EPS: f64 = 1e-9;

    fn make_candidate() -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            full_name: "Dana Okafor".to_string(),
            email: "dana@example.com".to_string(),
            handle: None,
            title: Some("Senior Engineer".to_string()),
            company: Some("Acme".to_string()),
            experience_years: 0,
            skills: vec![],
            location: None,
            pipeline_stage: "sourced".to_string(),
            availability: "unknown".to_string(),
            progression: "unknown".to_string(),
            salary_expectation_min: None,
            culture_ratings: vec![],
            engagement_score: None,
            match_score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_job() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            department: None,
            requirements: vec![],
            required_experience_years: None,
            salary_max: None,
            location: None,
            remote_allowed: false,
            status: "open".to_string(),
            priority: "normal".to_string(),
            created_at: Utc::now(),
        }
    }

    fn make_osint(
        technical_depth: Option<f64>,
        community_influence: Option<f64>,
        github_activity: Option<f64>,
    ) -> OsintProfileRow {
        OsintProfileRow {
            id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            technical_depth,
            community_influence,
            github_activity,
            availability_signal: None,
            refreshed_at: Utc::now(),
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_technical_fit_half_coverage_plus_full_experience_bonus() {
        // 1 of 2 requirements covered (0.5) + 10 years capped bonus (0.10) = 0.60
        let mut candidate = make_candidate();
        candidate.experience_years = 10;
        candidate.skills = skills(&["React", "Node", "AWS"]);
        let mut job = make_job();
        job.requirements = skills(&["React", "GraphQL"]);

        let score = technical_fit(&candidate, &job, None);
        assert!((score.value - 0.60).abs() < EPS, "got {}", score.value);
    }

    #[test]
    fn test_technical_fit_neutral_base_when_no_requirements() {
        let candidate = make_candidate();
        let job = make_job();
        let score = technical_fit(&candidate, &job, None);
        assert!((score.value - NEUTRAL_SCORE).abs() < EPS);
    }

    #[test]
    fn test_technical_fit_experience_bonus_capped_at_ten_years() {
        let mut veteran = make_candidate();
        veteran.experience_years = 30;
        let mut decade = make_candidate();
        decade.experience_years = 10;
        let job = make_job();

        let a = technical_fit(&veteran, &job, None);
        let b = technical_fit(&decade, &job, None);
        assert!((a.value - b.value).abs() < EPS);
    }

    #[test]
    fn test_technical_fit_osint_depth_bonus() {
        let candidate = make_candidate();
        let job = make_job();
        let osint = make_osint(Some(10.0), None, None);

        let with = technical_fit(&candidate, &job, Some(&osint));
        let without = technical_fit(&candidate, &job, None);
        assert!((with.value - without.value - 0.1).abs() < EPS);
    }

    #[test]
    fn test_technical_fit_clamped_to_one() {
        let mut candidate = make_candidate();
        candidate.experience_years = 10;
        candidate.skills = skills(&["rust"]);
        let mut job = make_job();
        job.requirements = skills(&["rust"]);
        let osint = make_osint(Some(10.0), None, None);

        let score = technical_fit(&candidate, &job, Some(&osint));
        assert!((score.value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_requirement_match_is_case_insensitive_substring() {
        assert!(skill_covers(&skills(&["react"]), "React experience"));
        assert!(skill_covers(&skills(&["React Native"]), "react"));
        assert!(!skill_covers(&skills(&["python"]), "rust"));
        assert!(!skill_covers(&skills(&["", "  "]), "rust"));
    }

    #[test]
    fn test_cultural_fit_prefers_recorded_ratings() {
        let mut candidate = make_candidate();
        candidate.culture_ratings = vec![0.8, 0.6];
        let osint = make_osint(None, Some(2.0), None);

        let score = cultural_fit(&candidate, Some(&osint));
        assert!((score.value - 0.7).abs() < EPS);
    }

    #[test]
    fn test_cultural_fit_falls_back_to_community_influence() {
        let candidate = make_candidate();
        let osint = make_osint(None, Some(8.0), None);
        let score = cultural_fit(&candidate, Some(&osint));
        assert!((score.value - 0.8).abs() < EPS);
    }

    #[test]
    fn test_cultural_fit_neutral_without_any_signal() {
        let candidate = make_candidate();
        let score = cultural_fit(&candidate, None);
        assert!((score.value - NEUTRAL_SCORE).abs() < EPS);
    }

    #[test]
    fn test_experience_match_proportional_below_stretch() {
        let mut candidate = make_candidate();
        candidate.experience_years = 3;
        let mut job = make_job();
        job.required_experience_years = Some(4);

        // 3 / (1.5 × 4) = 0.5
        let score = experience_match(&candidate, &job);
        assert!((score.value - 0.5).abs() < EPS);
    }

    #[test]
    fn test_experience_match_full_at_one_point_five_times_requirement() {
        let mut candidate = make_candidate();
        candidate.experience_years = 6;
        let mut job = make_job();
        job.required_experience_years = Some(4);

        let score = experience_match(&candidate, &job);
        assert!((score.value - 1.0).abs() < EPS);

        candidate.experience_years = 5;
        let below = experience_match(&candidate, &job);
        assert!(below.value < 1.0);
    }

    #[test]
    fn test_experience_match_trivial_without_requirement() {
        let candidate = make_candidate();
        let mut job = make_job();
        assert!((experience_match(&candidate, &job).value - 1.0).abs() < EPS);

        job.required_experience_years = Some(0);
        assert!((experience_match(&candidate, &job).value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_availability_categorical_mapping() {
        let cases = [
            ("active", 1.0),
            ("passive", 0.7),
            ("unavailable", 0.2),
            ("unknown", 0.5),
            ("open-to-work", 0.5),
        ];
        for (raw, expected) in cases {
            let mut candidate = make_candidate();
            candidate.availability = raw.to_string();
            let score = availability(&candidate);
            assert!(
                (score.value - expected).abs() < EPS,
                "{raw}: got {}",
                score.value
            );
        }
    }

    #[test]
    fn test_communication_prefers_engagement_score() {
        let mut candidate = make_candidate();
        candidate.engagement_score = Some(80.0);
        let osint = make_osint(None, None, Some(2.0));

        let score = communication(&candidate, Some(&osint));
        assert!((score.value - 0.8).abs() < EPS);
    }

    #[test]
    fn test_communication_falls_back_to_github_activity() {
        let candidate = make_candidate();
        let osint = make_osint(None, None, Some(6.0));
        let score = communication(&candidate, Some(&osint));
        assert!((score.value - 0.6).abs() < EPS);
    }

    #[test]
    fn test_communication_neutral_without_any_signal() {
        let candidate = make_candidate();
        let score = communication(&candidate, None);
        assert!((score.value - NEUTRAL_SCORE).abs() < EPS);
    }

    #[test]
    fn test_salary_alignment_ratio_and_cap() {
        let mut candidate = make_candidate();
        candidate.salary_expectation_min = Some(120_000);
        let mut job = make_job();
        job.salary_max = Some(90_000);

        let score = salary_alignment(&candidate, &job);
        assert!((score.value - 0.75).abs() < EPS);

        job.salary_max = Some(200_000);
        let capped = salary_alignment(&candidate, &job);
        assert!((capped.value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_salary_alignment_neutral_when_missing_or_zero() {
        let mut candidate = make_candidate();
        let mut job = make_job();
        assert!((salary_alignment(&candidate, &job).value - NEUTRAL_SCORE).abs() < EPS);

        candidate.salary_expectation_min = Some(0);
        job.salary_max = Some(150_000);
        assert!((salary_alignment(&candidate, &job).value - NEUTRAL_SCORE).abs() < EPS);
    }

    #[test]
    fn test_location_missing_is_checked_before_remote() {
        // No candidate location on a remote-friendly role must be neutral, not 0.8
        let candidate = make_candidate();
        let mut job = make_job();
        job.location = Some("Berlin".to_string());
        job.remote_allowed = true;

        let score = location_fit(&candidate, &job);
        assert!((score.value - NEUTRAL_SCORE).abs() < EPS);
    }

    #[test]
    fn test_location_substring_match_either_direction() {
        let mut candidate = make_candidate();
        candidate.location = Some("Berlin, Germany".to_string());
        let mut job = make_job();
        job.location = Some("berlin".to_string());

        let score = location_fit(&candidate, &job);
        assert!((score.value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_location_remote_fallback_and_onsite_mismatch() {
        let mut candidate = make_candidate();
        candidate.location = Some("Lisbon".to_string());
        let mut job = make_job();
        job.location = Some("Berlin".to_string());
        job.remote_allowed = true;

        let remote = location_fit(&candidate, &job);
        assert!((remote.value - 0.8).abs() < EPS);

        job.remote_allowed = false;
        let onsite = location_fit(&candidate, &job);
        assert!((onsite.value - 0.3).abs() < EPS);
    }

    #[test]
    fn test_career_trajectory_categorical_mapping() {
        let cases = [
            ("ascending", 0.9),
            ("lateral", 0.7),
            ("transitioning", 0.6),
            ("consulting", 0.5),
            ("unknown", 0.5),
            ("gibberish", 0.5),
        ];
        for (raw, expected) in cases {
            let mut candidate = make_candidate();
            candidate.progression = raw.to_string();
            let score = career_trajectory(&candidate);
            assert!(
                (score.value - expected).abs() < EPS,
                "{raw}: got {}",
                score.value
            );
        }
    }

    #[test]
    fn test_extract_all_covers_every_factor_in_range() {
        let candidate = make_candidate();
        let job = make_job();
        let scores = extract_all(&candidate, &job, None);

        assert_eq!(scores.len(), Factor::ALL.len());
        for factor in Factor::ALL {
            let score = &scores[&factor];
            assert!(
                (0.0..=1.0).contains(&score.value),
                "{factor} out of range: {}",
                score.value
            );
            assert!(!score.evidence.is_empty());
        }
    }

    #[test]
    fn test_extractors_stay_bounded_on_hostile_input() {
        let mut candidate = make_candidate();
        candidate.experience_years = -3;
        candidate.culture_ratings = vec![9.0, -2.0];
        candidate.engagement_score = Some(500.0);
        candidate.salary_expectation_min = Some(1);
        let mut job = make_job();
        job.salary_max = Some(i64::MAX);
        job.required_experience_years = Some(-1);
        let osint = make_osint(Some(99.0), Some(-4.0), Some(11.0));

        for (factor, score) in extract_all(&candidate, &job, Some(&osint)) {
            assert!(
                (0.0..=1.0).contains(&score.value),
                "{factor} out of range: {}",
                score.value
            );
        }
    }
}
