//! CV analysis pipeline.
//!
//! Flow: prompt escalation list → model call → extract JSON → normalize.
//! Every failure hands control to the next escalation level; after the last
//! level the hardcoded fallback result is returned. The pipeline is
//! infallible: callers always receive a fully-populated `CvAnalysis`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::defaults::{pad_questions, DEFAULT_JOB_TITLE, DEFAULT_SKILLS};
use crate::analysis::normalize::normalize_cv;
use crate::analysis::prompts::{cv_analysis_prompts, CV_ANALYSIS_SYSTEM};
use crate::llm_client::extract::extract_value;
use crate::llm_client::TextGenerator;

/// Default number of questions generated per CV.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Result of analyzing a CV. Invariants: `questions` has exactly the
/// requested count and `skills` is non-empty, even on total model failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub job_title: String,
    pub skills: Vec<String>,
    pub questions: Vec<String>,
    pub years_experience: u8,
}

/// Analyzes CV text and produces a job title, key skills, and tailored
/// interview questions.
///
/// Never fails: model errors and unparseable output are absorbed by the
/// escalation chain and, last of all, the hardcoded default analysis.
pub async fn analyze_cv(
    llm: &dyn TextGenerator,
    cv_text: &str,
    years_experience: u8,
    question_count: usize,
) -> CvAnalysis {
    let prompts = cv_analysis_prompts(cv_text, years_experience, question_count);

    for (level, prompt) in prompts.iter().enumerate() {
        match llm.generate(prompt, CV_ANALYSIS_SYSTEM).await {
            Ok(text) => match extract_value(&text) {
                Ok(value) => {
                    debug!("CV analysis succeeded at escalation level {level}");
                    return normalize_cv(&value, years_experience, question_count);
                }
                Err(e) => {
                    warn!("CV analysis level {level}: unusable model output: {e}");
                }
            },
            Err(e) => {
                warn!("CV analysis level {level}: model call failed: {e}");
            }
        }
    }

    info!("CV analysis fell through all escalation levels; returning default analysis");
    fallback_cv_analysis(years_experience, question_count)
}

/// The hardcoded final fallback: default title, skills, and questions.
pub fn fallback_cv_analysis(years_experience: u8, question_count: usize) -> CvAnalysis {
    CvAnalysis {
        job_title: DEFAULT_JOB_TITLE.to_string(),
        skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
        questions: pad_questions(Vec::new(), question_count),
        years_experience,
    }
}
