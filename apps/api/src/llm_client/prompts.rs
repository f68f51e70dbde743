// Shared prompt fragments. Each service that calls the gateway defines its own
// prompts.rs alongside it; this file contains the cross-cutting pieces.

/// Common instruction included in every prompt that mentions a candidate.
pub const FACTS_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY the candidate facts provided in this prompt. \
    Do NOT infer, interpolate, or invent details about the candidate, \
    their employer, or their work. If a fact is not provided, leave it out.";
