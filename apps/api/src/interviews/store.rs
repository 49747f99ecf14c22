//! Persistence for interview sessions: users, interviews, and their
//! index-ordered questions.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::cv::CvAnalysis;
use crate::analysis::feedback::FeedbackReport;
use crate::models::interview::{
    InterviewRow, QuestionRow, UserRow, STATUS_COMPLETED, STATUS_PENDING,
};

/// Upserts the identity-provider user. The id is opaque to this service;
/// email is refreshed on every sign-in.
pub async fn upsert_user(pool: &PgPool, user_id: &str, email: &str) -> Result<UserRow> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, email)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

/// Creates a pending interview with its ordered questions from a CV analysis.
pub async fn create_interview(
    pool: &PgPool,
    user_id: &str,
    analysis: &CvAnalysis,
) -> Result<(InterviewRow, Vec<QuestionRow>)> {
    let interview_id = Uuid::new_v4();

    let interview = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews (id, user_id, job_title, years_experience, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(interview_id)
    .bind(user_id)
    .bind(&analysis.job_title)
    .bind(analysis.years_experience as i32)
    .bind(STATUS_PENDING)
    .fetch_one(pool)
    .await?;

    let mut questions = Vec::with_capacity(analysis.questions.len());
    for (index, question_text) in analysis.questions.iter().enumerate() {
        let question = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (id, interview_id, question_text, order_index)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(interview_id)
        .bind(question_text)
        .bind(index as i32)
        .fetch_one(pool)
        .await?;
        questions.push(question);
    }

    Ok((interview, questions))
}

pub async fn get_interview(pool: &PgPool, interview_id: Uuid) -> Result<Option<InterviewRow>> {
    let interview = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(interview_id)
        .fetch_optional(pool)
        .await?;
    Ok(interview)
}

/// Questions for an interview, in asked order.
pub async fn get_questions(pool: &PgPool, interview_id: Uuid) -> Result<Vec<QuestionRow>> {
    let questions = sqlx::query_as::<_, QuestionRow>(
        "SELECT * FROM questions WHERE interview_id = $1 ORDER BY order_index",
    )
    .bind(interview_id)
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

/// Records the answer to one question. Returns None when no question exists
/// at `order_index`.
pub async fn record_answer(
    pool: &PgPool,
    interview_id: Uuid,
    order_index: i32,
    answer: &str,
) -> Result<Option<QuestionRow>> {
    let question = sqlx::query_as::<_, QuestionRow>(
        r#"
        UPDATE questions SET answer = $3
        WHERE interview_id = $1 AND order_index = $2
        RETURNING *
        "#,
    )
    .bind(interview_id)
    .bind(order_index)
    .bind(answer)
    .fetch_optional(pool)
    .await?;
    Ok(question)
}

/// Writes the feedback report through to the interview and its questions and
/// marks the interview completed.
///
/// `report.question_feedback` is index-aligned with the stored questions by
/// the pipeline invariant, so entries are written by order_index.
pub async fn complete_interview(
    pool: &PgPool,
    interview_id: Uuid,
    report: &FeedbackReport,
) -> Result<InterviewRow> {
    let mut tx = pool.begin().await?;

    for (index, entry) in report.question_feedback.iter().enumerate() {
        sqlx::query(
            r#"
            UPDATE questions SET score = $3, feedback = $4
            WHERE interview_id = $1 AND order_index = $2
            "#,
        )
        .bind(interview_id)
        .bind(index as i32)
        .bind(entry.score as i32)
        .bind(&entry.feedback)
        .execute(&mut *tx)
        .await?;
    }

    let interview = sqlx::query_as::<_, InterviewRow>(
        r#"
        UPDATE interviews
        SET status = $2, overall_score = $3, feedback = $4, completed_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(interview_id)
    .bind(STATUS_COMPLETED)
    .bind(report.overall_score as i32)
    .bind(&report.feedback)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(interview)
}

/// A user's interviews, newest first.
pub async fn list_interviews(pool: &PgPool, user_id: &str) -> Result<Vec<InterviewRow>> {
    let interviews = sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(interviews)
}
