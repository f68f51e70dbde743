// Candidate assessment: deterministic scoring plus model-written summaries.

pub mod handlers;
pub mod insights;
pub mod predictor;
pub mod prompts;
