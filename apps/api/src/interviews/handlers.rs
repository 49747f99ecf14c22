//! Axum route handlers for the Interviews API — create a session from a CV
//! analysis, record answers, complete with generated feedback, list history.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::cv::CvAnalysis;
use crate::analysis::feedback::{analyze_feedback, FeedbackReport};
use crate::errors::AppError;
use crate::interviews::store;
use crate::models::interview::{InterviewRow, QuestionRow, STATUS_COMPLETED};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub user_id: String,
    pub email: String,
    pub analysis: CvAnalysis,
}

#[derive(Debug, Serialize)]
pub struct InterviewDetailResponse {
    pub interview: InterviewRow,
    pub questions: Vec<QuestionRow>,
}

#[derive(Debug, Deserialize)]
pub struct RecordAnswerRequest {
    pub order_index: i32,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CompleteInterviewResponse {
    pub interview: InterviewRow,
    pub report: FeedbackReport,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub interviews: Vec<InterviewRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Upserts the user and creates a pending interview with the analysis's
/// questions in asked order.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }
    if request.analysis.questions.is_empty() {
        return Err(AppError::Validation(
            "analysis must contain at least one question".to_string(),
        ));
    }

    store::upsert_user(&state.db, &request.user_id, &request.email)
        .await
        .map_err(AppError::Internal)?;

    let (interview, questions) = store::create_interview(&state.db, &request.user_id, &request.analysis)
        .await
        .map_err(AppError::Internal)?;

    info!(
        "Created interview {} with {} questions for user {}",
        interview.id,
        questions.len(),
        request.user_id
    );

    Ok(Json(InterviewDetailResponse {
        interview,
        questions,
    }))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    let interview = store::get_interview(&state.db, interview_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    let questions = store::get_questions(&state.db, interview_id)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(InterviewDetailResponse {
        interview,
        questions,
    }))
}

/// POST /api/v1/interviews/:id/answers
///
/// Records one answer. Rejected once the interview is completed.
pub async fn handle_record_answer(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(request): Json<RecordAnswerRequest>,
) -> Result<Json<QuestionRow>, AppError> {
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let interview = store::get_interview(&state.db, interview_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    if interview.status == STATUS_COMPLETED {
        return Err(AppError::Validation(
            "interview is already completed".to_string(),
        ));
    }

    let question = store::record_answer(&state.db, interview_id, request.order_index, &request.answer)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| {
            AppError::Validation(format!(
                "no question at order_index {}",
                request.order_index
            ))
        })?;

    Ok(Json(question))
}

/// POST /api/v1/interviews/:id/complete
///
/// Runs the feedback pipeline over the stored question/answer set, persists
/// the result, and marks the interview completed. A second call is rejected.
pub async fn handle_complete_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<CompleteInterviewResponse>, AppError> {
    let interview = store::get_interview(&state.db, interview_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    if interview.status == STATUS_COMPLETED {
        return Err(AppError::Validation(
            "interview is already completed".to_string(),
        ));
    }

    let rows = store::get_questions(&state.db, interview_id)
        .await
        .map_err(AppError::Internal)?;

    let questions: Vec<String> = rows.iter().map(|q| q.question_text.clone()).collect();
    let answers: Vec<String> = rows
        .iter()
        .map(|q| q.answer.clone().unwrap_or_default())
        .collect();

    let years = u8::try_from(interview.years_experience).ok();
    let report = analyze_feedback(
        state.llm.as_ref(),
        &questions,
        &answers,
        Some(&interview.job_title),
        years,
    )
    .await;

    let interview = store::complete_interview(&state.db, interview_id, &report)
        .await
        .map_err(AppError::Internal)?;

    info!(
        "Completed interview {} with overall score {}",
        interview.id, report.overall_score
    );

    Ok(Json(CompleteInterviewResponse { interview, report }))
}

/// GET /api/v1/interviews?user_id=
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let interviews = store::list_interviews(&state.db, &query.user_id)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(HistoryResponse { interviews }))
}
