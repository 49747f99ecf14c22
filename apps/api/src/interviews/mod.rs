//! Interviews — persisted interview sessions built from a CV analysis,
//! answered one question at a time, and completed with generated feedback.

pub mod handlers;
pub mod store;
