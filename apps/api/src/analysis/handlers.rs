//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::cv::{analyze_cv, CvAnalysis, DEFAULT_QUESTION_COUNT};
use crate::analysis::feedback::{analyze_feedback, FeedbackReport};
use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound for the years-of-experience slider and question count.
const MAX_YEARS_EXPERIENCE: u8 = 50;
const MAX_QUESTION_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct CvAnalysisRequest {
    /// May be empty — an empty CV still yields the full default analysis.
    pub cv_text: String,
    pub years_experience: u8,
    pub question_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub questions: Vec<String>,
    /// Index-aligned with `questions`; may be shorter (gaps are tolerated).
    pub answers: Vec<String>,
    pub job_title: Option<String>,
    pub years_experience: Option<u8>,
}

/// POST /api/v1/analysis/cv
///
/// Runs the CV-analysis pipeline. Always succeeds once validation passes:
/// model failures degrade to the default analysis, never to an error.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    Json(request): Json<CvAnalysisRequest>,
) -> Result<Json<CvAnalysis>, AppError> {
    if request.years_experience > MAX_YEARS_EXPERIENCE {
        return Err(AppError::Validation(format!(
            "years_experience must be at most {MAX_YEARS_EXPERIENCE}"
        )));
    }

    let question_count = request.question_count.unwrap_or(DEFAULT_QUESTION_COUNT);
    if question_count == 0 || question_count > MAX_QUESTION_COUNT {
        return Err(AppError::Validation(format!(
            "question_count must be between 1 and {MAX_QUESTION_COUNT}"
        )));
    }

    let analysis = analyze_cv(
        state.llm.as_ref(),
        &request.cv_text,
        request.years_experience,
        question_count,
    )
    .await;

    Ok(Json(analysis))
}

/// POST /api/v1/analysis/feedback
///
/// Runs the feedback pipeline over a question/answer set. Always succeeds
/// once validation passes.
pub async fn handle_analyze_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackReport>, AppError> {
    if request.questions.is_empty() {
        return Err(AppError::Validation(
            "questions cannot be empty".to_string(),
        ));
    }
    if request.answers.len() > request.questions.len() {
        return Err(AppError::Validation(
            "answers cannot outnumber questions".to_string(),
        ));
    }

    let report = analyze_feedback(
        state.llm.as_ref(),
        &request.questions,
        &request.answers,
        request.job_title.as_deref(),
        request.years_experience,
    )
    .await;

    Ok(Json(report))
}
