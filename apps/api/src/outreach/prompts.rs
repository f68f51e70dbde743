// LLM prompt constants for the Outreach module.
// Polish never changes facts — it only smooths the deterministic render.

/// System prompt for message polish — enforces JSON-only output.
pub const POLISH_SYSTEM: &str = "You are an expert recruiting copywriter. \
    You rewrite outreach messages to read naturally while preserving every fact. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Polish prompt template.
/// Replace: {facts_instruction}, {message}, {candidate_json}
pub const POLISH_PROMPT_TEMPLATE: &str = r#"{facts_instruction}

Rewrite the outreach message below so it reads like a short, warm, personal
note from a recruiter. Keep it under 120 words. Keep every concrete fact
(names, companies, skills, numbers) exactly as written. Do not add greetings
or signatures that are not already there.

CANDIDATE FACTS (for reference only — do not introduce new ones):
{candidate_json}

MESSAGE TO POLISH:
{message}

Return a JSON object:
{
  "message": "the polished message text"
}"#;
