//! Analysis — the CV-analysis and interview-feedback generation pipelines.
//!
//! Both pipelines share the same shape: an explicit prompt-escalation list
//! consumed by a single retry loop, JSON extraction from free-form model
//! text, defaults-backed normalization, and a fallback generator that makes
//! the pipelines infallible from the caller's point of view.

pub mod cv;
pub mod defaults;
pub mod feedback;
pub mod handlers;
pub mod normalize;
pub mod prompts;
