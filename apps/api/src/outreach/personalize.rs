//! Message personalization — deterministic `{{placeholder}}` substitution.
//!
//! Unknown placeholders are left verbatim in the output so template typos
//! surface in review instead of silently disappearing. The quality score is a
//! fill-rate proxy: only placeholders filled from real candidate data count,
//! defaulted fills keep the base.

use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateRow;

/// Every placeholder the renderer knows how to fill.
pub const KNOWN_PLACEHOLDERS: [&str; 7] = [
    "first_name",
    "full_name",
    "current_role",
    "company",
    "top_skills",
    "years_experience",
    "location",
];

/// Quality baseline for any rendered message.
pub const BASE_QUALITY: f64 = 5.0;
/// Bonus per distinct placeholder filled from real candidate data.
pub const PER_FIELD_QUALITY: f64 = 1.0;
/// Quality ceiling.
pub const MAX_QUALITY: f64 = 10.0;

/// How many skills `{{top_skills}}` lists.
const TOP_SKILLS_COUNT: usize = 3;

/// A deterministic render of a template body for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub text: String,
    /// 5.0 base + 1.0 per placeholder filled from real data, capped at 10.0.
    pub quality_score: f64,
    /// Placeholders present in the template and filled from real data.
    pub personalized_fields: Vec<String>,
    /// Placeholders present in the template that fell back to a generic default.
    pub defaulted_fields: Vec<String>,
}

struct Derived {
    value: String,
    from_data: bool,
}

impl Derived {
    fn real(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            from_data: true,
        }
    }

    fn fallback(value: &str) -> Self {
        Self {
            value: value.to_string(),
            from_data: false,
        }
    }
}

/// Renders a template for a candidate. Total: any candidate renders, an empty
/// one just gets every field defaulted and the base quality score.
pub fn render(template: &str, candidate: &CandidateRow) -> RenderedMessage {
    let mut text = template.to_string();
    let mut personalized_fields = Vec::new();
    let mut defaulted_fields = Vec::new();

    for name in KNOWN_PLACEHOLDERS {
        let token = format!("{{{{{name}}}}}");
        if !text.contains(&token) {
            continue;
        }
        let Some(derived) = derive_field(name, candidate) else {
            continue;
        };
        text = text.replace(&token, &derived.value);
        if derived.from_data {
            personalized_fields.push(name.to_string());
        } else {
            defaulted_fields.push(name.to_string());
        }
    }

    let quality_score =
        (BASE_QUALITY + PER_FIELD_QUALITY * personalized_fields.len() as f64).min(MAX_QUALITY);

    RenderedMessage {
        text,
        quality_score,
        personalized_fields,
        defaulted_fields,
    }
}

/// Derives the replacement for one known placeholder. `from_data` is false
/// when the candidate had nothing and a generic default was used instead.
/// `None` only for names outside `KNOWN_PLACEHOLDERS`, which stay verbatim.
fn derive_field(name: &str, candidate: &CandidateRow) -> Option<Derived> {
    let derived = match name {
        "first_name" => match candidate.full_name.split_whitespace().next() {
            Some(first) => Derived::real(first),
            None => Derived::fallback("there"),
        },
        "full_name" => {
            let trimmed = candidate.full_name.trim();
            if trimmed.is_empty() {
                Derived::fallback("there")
            } else {
                Derived::real(trimmed)
            }
        }
        "current_role" => match nonempty(candidate.title.as_deref()) {
            Some(title) => Derived::real(title),
            None => Derived::fallback("your current role"),
        },
        "company" => match nonempty(candidate.company.as_deref()) {
            Some(company) => Derived::real(company),
            None => Derived::fallback("your company"),
        },
        "top_skills" => {
            let listed: Vec<&str> = candidate
                .skills
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .take(TOP_SKILLS_COUNT)
                .collect();
            if listed.is_empty() {
                Derived::fallback("your field")
            } else {
                Derived::real(listed.join(", "))
            }
        }
        "years_experience" => {
            // "0 years of experience" makes terrible outreach copy
            if candidate.experience_years > 0 {
                Derived::real(candidate.experience_years.to_string())
            } else {
                Derived::fallback("several")
            }
        }
        "location" => match nonempty(candidate.location.as_deref()) {
            Some(location) => Derived::real(location),
            None => Derived::fallback("your area"),
        },
        _ => return None,
    };
    Some(derived)
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    const EPS: f64 = 1e-9;

    fn full_candidate() -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            full_name: "Maya Lindqvist".to_string(),
            email: "maya@example.com".to_string(),
            handle: None,
            title: Some("Platform Engineer".to_string()),
            company: Some("Nordwind".to_string()),
            experience_years: 7,
            skills: vec![
                "Rust".to_string(),
                "Kubernetes".to_string(),
                "Postgres".to_string(),
                "Terraform".to_string(),
            ],
            location: Some("Stockholm".to_string()),
            pipeline_stage: "sourced".to_string(),
            availability: "passive".to_string(),
            progression: "ascending".to_string(),
            salary_expectation_min: None,
            culture_ratings: vec![],
            engagement_score: None,
            match_score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn empty_candidate() -> CandidateRow {
        let mut candidate = full_candidate();
        candidate.full_name = String::new();
        candidate.title = None;
        candidate.company = None;
        candidate.skills = vec![];
        candidate.location = None;
        candidate.experience_years = 0;
        candidate
    }

    #[test]
    fn test_known_placeholders_are_substituted() {
        let rendered = render(
            "Hi {{first_name}}, your work at {{company}} on {{top_skills}} caught our eye.",
            &full_candidate(),
        );
        assert_eq!(
            rendered.text,
            "Hi Maya, your work at Nordwind on Rust, Kubernetes, Postgres caught our eye."
        );
        assert_eq!(
            rendered.personalized_fields,
            vec!["first_name", "company", "top_skills"]
        );
        assert!(rendered.defaulted_fields.is_empty());
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let rendered = render("Hi {{first_name}}, re: {{req_number}}", &full_candidate());
        assert_eq!(rendered.text, "Hi Maya, re: {{req_number}}");
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let rendered = render("{{first_name}}! Yes, you, {{first_name}}.", &full_candidate());
        assert_eq!(rendered.text, "Maya! Yes, you, Maya.");
        // Counted once for quality
        assert_eq!(rendered.personalized_fields, vec!["first_name"]);
        assert!((rendered.quality_score - (BASE_QUALITY + 1.0)).abs() < EPS);
    }

    #[test]
    fn test_empty_candidate_renders_with_defaults_at_base_quality() {
        let rendered = render(
            "Hi {{first_name}} ({{full_name}}), {{current_role}} at {{company}}, \
             {{years_experience}} years in {{top_skills}} around {{location}}.",
            &empty_candidate(),
        );
        assert_eq!(
            rendered.text,
            "Hi there (there), your current role at your company, \
             several years in your field around your area."
        );
        assert!(rendered.personalized_fields.is_empty());
        assert_eq!(rendered.defaulted_fields.len(), 7);
        assert!((rendered.quality_score - BASE_QUALITY).abs() < EPS);
    }

    #[test]
    fn test_quality_score_caps_at_max() {
        let rendered = render(
            "{{first_name}} {{full_name}} {{current_role}} {{company}} \
             {{top_skills}} {{years_experience}} {{location}}",
            &full_candidate(),
        );
        assert_eq!(rendered.personalized_fields.len(), 7);
        assert!((rendered.quality_score - MAX_QUALITY).abs() < EPS);
    }

    #[test]
    fn test_top_skills_lists_at_most_three() {
        let rendered = render("{{top_skills}}", &full_candidate());
        assert_eq!(rendered.text, "Rust, Kubernetes, Postgres");
    }

    #[test]
    fn test_template_without_placeholders_is_untouched() {
        let rendered = render("Fixed copy, no tokens.", &full_candidate());
        assert_eq!(rendered.text, "Fixed copy, no tokens.");
        assert!(rendered.personalized_fields.is_empty());
        assert!((rendered.quality_score - BASE_QUALITY).abs() < EPS);
    }

    #[test]
    fn test_first_name_is_first_whitespace_token() {
        let mut candidate = full_candidate();
        candidate.full_name = "  Jean-Luc  Moreau ".to_string();
        let rendered = render("{{first_name}}", &candidate);
        assert_eq!(rendered.text, "Jean-Luc");
    }
}
