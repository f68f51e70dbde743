pub mod assessment;
pub mod candidate;
pub mod job;
pub mod osint;
pub mod template;
