//! Assessment summaries — model-written prose with a deterministic fallback.
//!
//! The fallback is not an error path dressed up as a feature: it is the
//! canonical summary, and the model call only replaces it when it succeeds.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::prompts::{SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};
use crate::llm_client::prompts::FACTS_ONLY_INSTRUCTION;
use crate::llm_client::{decode, GatewayError, ModelGateway};
use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;
use crate::scoring::MatchReport;

/// `summary_source` label when the gateway wrote the prose.
pub const SOURCE_MODEL: &str = "model";
/// `summary_source` label for the deterministic fallback.
pub const SOURCE_DETERMINISTIC: &str = "deterministic";

#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub text: String,
    pub source: &'static str,
}

/// Builds the assessment summary, preferring the model and falling back to
/// the deterministic text on any gateway failure.
pub async fn summarize(
    gateway: &dyn ModelGateway,
    report: &MatchReport,
    candidate: &CandidateRow,
    job: &JobRow,
) -> SummaryOutcome {
    match model_summary(gateway, report, candidate, job).await {
        Ok(text) => SummaryOutcome {
            text,
            source: SOURCE_MODEL,
        },
        Err(e) => {
            warn!("Summary call failed, using deterministic summary: {e}");
            SummaryOutcome {
                text: deterministic_summary(report, candidate, job),
                source: SOURCE_DETERMINISTIC,
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelSummary {
    summary: String,
}

async fn model_summary(
    gateway: &dyn ModelGateway,
    report: &MatchReport,
    candidate: &CandidateRow,
    job: &JobRow,
) -> Result<String, GatewayError> {
    let prompt = build_summary_prompt(report, candidate, job);
    let value = gateway.submit(&prompt, SUMMARY_SYSTEM).await?;
    let parsed: ModelSummary = decode(value)?;
    if parsed.summary.trim().is_empty() {
        return Err(GatewayError::InvalidResponseFormat {
            reason: "summary was empty".to_string(),
        });
    }
    Ok(parsed.summary)
}

fn build_summary_prompt(report: &MatchReport, candidate: &CandidateRow, job: &JobRow) -> String {
    let report_json = serde_json::json!({
        "score_percent": report.score_percent(),
        "verdict": report.verdict,
        "strengths": report.strengths,
        "risk_factors": report.risk_factors,
        "recommendations": report.recommendations,
    })
    .to_string();

    SUMMARY_PROMPT_TEMPLATE
        .replace("{facts_instruction}", FACTS_ONLY_INSTRUCTION)
        .replace("{candidate_name}", &candidate.full_name)
        .replace("{job_title}", &job.title)
        .replace("{report_json}", &report_json)
}

/// Deterministic summary assembled from the report. Always available.
pub fn deterministic_summary(
    report: &MatchReport,
    candidate: &CandidateRow,
    job: &JobRow,
) -> String {
    let mut summary = format!(
        "{} scores {}% against {} ({}).",
        candidate.full_name,
        report.score_percent(),
        job.title,
        report.verdict.as_str(),
    );
    if let Some(strength) = report.strengths.first() {
        summary.push_str(&format!(" Top strength: {strength}."));
    }
    if !report.risk_factors.is_empty() {
        summary.push_str(&format!(" Flagged: {}.", report.risk_factors.join("; ")));
    }
    if let Some(recommendation) = report.recommendations.first() {
        summary.push_str(&format!(" Next step: {recommendation}."));
    }
    summary
}
