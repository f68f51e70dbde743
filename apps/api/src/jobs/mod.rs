// Job requisitions that candidates are scored against.

pub mod handlers;
pub mod store;
