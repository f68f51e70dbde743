// Outreach: message templates and candidate personalization.
// The render is deterministic; the optional polish call goes through
// llm_client and always falls back to the deterministic text.

pub mod handlers;
pub mod personalize;
pub mod prompts;
pub mod templates;
