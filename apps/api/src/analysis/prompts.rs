// LLM prompt constants for the Analysis module.
// The model only writes prose over an already-computed report — it never
// scores anything itself.

/// System prompt for assessment summaries — enforces JSON-only output.
pub const SUMMARY_SYSTEM: &str = "You are an expert technical recruiter writing \
    a hiring assessment summary from a precomputed scoring report. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Summary prompt template.
/// Replace: {facts_instruction}, {candidate_name}, {job_title}, {report_json}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"{facts_instruction}

Write a 2–3 sentence hiring summary for the assessment below. Lead with the
overall signal, name the single biggest strength and the single biggest risk,
and end with the recommended next step. Do not restate raw numbers beyond the
overall score.

CANDIDATE: {candidate_name}
ROLE: {job_title}

SCORING REPORT (precomputed — do not re-score):
{report_json}

Return a JSON object:
{
  "summary": "the summary text"
}"#;
