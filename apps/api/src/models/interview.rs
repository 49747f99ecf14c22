use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Interview lifecycle states stored in `interviews.status`.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    /// Identity-provider user id — opaque to this service.
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: String,
    pub job_title: String,
    pub years_experience: i32,
    pub status: String,
    pub overall_score: Option<i32>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub question_text: String,
    pub answer: Option<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub order_index: i32,
}
