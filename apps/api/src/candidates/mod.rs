// Candidate records, pipeline stages, and OSINT enrichment signals.

pub mod handlers;
pub mod store;
