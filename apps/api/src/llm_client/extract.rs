//! Response Extractor — locates a JSON object or array embedded in free-form
//! model output.
//!
//! Strategy order:
//! 1. fenced code block (```json ... ``` or ``` ... ```)
//! 2. bare brace-delimited object
//! 3. bare bracket-delimited array
//!
//! The first strategy that matches wins. Matching is greedy (first opening
//! delimiter to last closing delimiter), so input containing multiple
//! JSON-like substrings may capture more than intended. This is a known-lossy
//! heuristic: the prompt layer instructs the model to emit a single JSON
//! value, and the normalizer tolerates junk fields.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fenced block regex"));

static BARE_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("bare object regex"));

static BARE_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("bare array regex"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON found in model output")]
    NoMatch,

    #[error("candidate substring is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Isolates the most plausible JSON substring from raw model text.
pub fn extract_json(text: &str) -> Result<&str, ExtractError> {
    if let Some(captures) = FENCED_BLOCK.captures(text) {
        if let Some(inner) = captures.get(1) {
            return Ok(inner.as_str());
        }
    }

    if let Some(m) = BARE_OBJECT.find(text) {
        return Ok(m.as_str());
    }

    if let Some(m) = BARE_ARRAY.find(text) {
        return Ok(m.as_str());
    }

    Err(ExtractError::NoMatch)
}

/// Extracts and parses the embedded JSON in one step.
///
/// A parse failure on the candidate substring is equivalent to "no JSON
/// found" from the pipeline's point of view — both hand control to the next
/// escalation level. The error variant is kept distinct for logging only.
pub fn extract_value(text: &str) -> Result<serde_json::Value, ExtractError> {
    let candidate = extract_json(text)?;
    Ok(serde_json::from_str(candidate)?)
}
