//! Shape Normalizer — coerces loosely-typed model JSON into the typed result
//! shapes, substituting an entry from the defaults table for every field that
//! is absent, the wrong type, or empty.
//!
//! Contract: never fails, fully deterministic, idempotent on well-formed
//! input. Field names follow the model-facing JSON contract (camelCase);
//! the typed results use the service's own shapes.

use serde_json::Value;

use crate::analysis::cv::CvAnalysis;
use crate::analysis::defaults::{
    default_difficulty, heuristic_answer_score, heuristic_overall_score, pad_questions,
    DEFAULT_AREAS_TO_IMPROVE, DEFAULT_FEEDBACK_SUMMARY, DEFAULT_JOB_TITLE,
    DEFAULT_QUESTION_FEEDBACK, DEFAULT_SKILLS, DEFAULT_STRENGTHS,
};
use crate::analysis::feedback::{Difficulty, FeedbackReport, QuestionFeedback};

/// Stand-in for absent per-question entries.
static JSON_NULL: Value = Value::Null;

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

/// Non-empty string field, or None.
fn opt_string(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// All non-empty string elements of an array field. Non-string elements are
/// dropped rather than failing the whole list.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Integer field clamped to [0, 100]. Accepts floats the model sometimes
/// emits for scores.
fn opt_score(value: &Value, key: &str) -> Option<u32> {
    let raw = value.get(key)?;
    let score = raw
        .as_u64()
        .map(|n| n as f64)
        .or_else(|| raw.as_f64())
        .filter(|n| n.is_finite())?;
    Some(score.clamp(0.0, 100.0).round() as u32)
}

fn opt_difficulty(value: &Value) -> Option<Difficulty> {
    match value.get("difficulty").and_then(Value::as_str)? {
        d if d.eq_ignore_ascii_case("easy") => Some(Difficulty::Easy),
        d if d.eq_ignore_ascii_case("medium") => Some(Difficulty::Medium),
        d if d.eq_ignore_ascii_case("hard") => Some(Difficulty::Hard),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CV analysis
// ────────────────────────────────────────────────────────────────────────────

/// Coerces parsed model JSON into a fully-populated `CvAnalysis`.
///
/// `questions` is padded (cycling through the defaults) or truncated so the
/// result always carries exactly `question_count` questions.
pub fn normalize_cv(value: &Value, years_experience: u8, question_count: usize) -> CvAnalysis {
    let job_title = opt_string(value, "jobTitle").unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string());

    let mut skills = string_list(value, "skills");
    if skills.is_empty() {
        skills = DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    let questions = pad_questions(string_list(value, "questions"), question_count);

    CvAnalysis {
        job_title,
        skills,
        questions,
        years_experience,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback
// ────────────────────────────────────────────────────────────────────────────

/// Coerces parsed model JSON into a fully-populated `FeedbackReport`.
///
/// `question_feedback` is rebuilt index-aligned against the input questions:
/// the model's i-th entry (if any) supplies score/feedback/difficulty for the
/// i-th question, and the question text itself always comes from the input,
/// never from the model.
pub fn normalize_feedback(
    value: &Value,
    questions: &[String],
    answers: &[String],
) -> FeedbackReport {
    let empty = Vec::new();
    let entries = value
        .get("questionFeedback")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let question_feedback: Vec<QuestionFeedback> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let entry = entries.get(i).unwrap_or(&JSON_NULL);
            let answer = answers.get(i).map(String::as_str).unwrap_or("");
            QuestionFeedback {
                question: question.clone(),
                score: opt_score(entry, "score").unwrap_or_else(|| heuristic_answer_score(answer)),
                feedback: opt_string(entry, "feedback")
                    .unwrap_or_else(|| DEFAULT_QUESTION_FEEDBACK.to_string()),
                difficulty: opt_difficulty(entry).unwrap_or_else(|| default_difficulty(i)),
                key_points: string_list(entry, "keyPoints"),
            }
        })
        .collect();

    let per_question_scores: Vec<u32> = question_feedback.iter().map(|f| f.score).collect();
    let overall_score = opt_score(value, "overallScore")
        .unwrap_or_else(|| heuristic_overall_score(&per_question_scores));

    let feedback =
        opt_string(value, "feedback").unwrap_or_else(|| DEFAULT_FEEDBACK_SUMMARY.to_string());

    let mut strengths = string_list(value, "strengths");
    if strengths.is_empty() {
        strengths = DEFAULT_STRENGTHS.iter().map(|s| s.to_string()).collect();
    }

    let mut areas_to_improve = string_list(value, "areasToImprove");
    if areas_to_improve.is_empty() {
        areas_to_improve = DEFAULT_AREAS_TO_IMPROVE
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    FeedbackReport {
        overall_score,
        feedback,
        strengths,
        areas_to_improve,
        question_feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn qs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── CV ──────────────────────────────────────────────────────────────

    #[test]
    fn test_well_formed_cv_passes_through() {
        let value = json!({
            "jobTitle": "Senior React Developer",
            "skills": ["React", "TypeScript"],
            "questions": ["Q1", "Q2", "Q3"]
        });
        let result = normalize_cv(&value, 5, 3);
        assert_eq!(result.job_title, "Senior React Developer");
        assert_eq!(result.skills, qs(&["React", "TypeScript"]));
        assert_eq!(result.questions, qs(&["Q1", "Q2", "Q3"]));
        assert_eq!(result.years_experience, 5);
    }

    #[test]
    fn test_empty_object_yields_all_defaults() {
        let result = normalize_cv(&json!({}), 2, 10);
        assert_eq!(result.job_title, DEFAULT_JOB_TITLE);
        assert_eq!(result.skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(result.questions.len(), 10);
    }

    #[test]
    fn test_wrong_typed_fields_are_defaulted() {
        let value = json!({
            "jobTitle": 42,
            "skills": "not an array",
            "questions": [1, 2, {"q": "nested"}]
        });
        let result = normalize_cv(&value, 0, 10);
        assert_eq!(result.job_title, DEFAULT_JOB_TITLE);
        assert_eq!(result.skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(result.questions.len(), 10);
    }

    #[test]
    fn test_questions_padded_to_requested_count() {
        let value = json!({"questions": ["Only one"]});
        let result = normalize_cv(&value, 1, 10);
        assert_eq!(result.questions.len(), 10);
        assert_eq!(result.questions[0], "Only one");
    }

    #[test]
    fn test_questions_truncated_to_requested_count() {
        let many: Vec<String> = (0..20).map(|i| format!("Q{i}")).collect();
        let value = json!({ "questions": many });
        let result = normalize_cv(&value, 1, 10);
        assert_eq!(result.questions.len(), 10);
    }

    #[test]
    fn test_cv_normalization_is_idempotent() {
        let value = json!({
            "jobTitle": "Data Engineer",
            "skills": ["Spark"],
            "questions": ["Q1", "Q2"]
        });
        let first = normalize_cv(&value, 4, 5);
        let second = normalize_cv(&value, 4, 5);
        assert_eq!(first, second);
    }

    // ── Feedback ────────────────────────────────────────────────────────

    #[test]
    fn test_well_formed_feedback_passes_through() {
        let value = json!({
            "overallScore": 82,
            "feedback": "Solid interview.",
            "strengths": ["Clarity"],
            "areasToImprove": ["Examples"],
            "questionFeedback": [
                {"question": "ignored", "score": 85, "feedback": "Good.",
                 "difficulty": "Medium", "keyPoints": ["REST basics"]}
            ]
        });
        let report = normalize_feedback(&value, &qs(&["Q1"]), &qs(&["A1"]));
        assert_eq!(report.overall_score, 82);
        assert_eq!(report.feedback, "Solid interview.");
        assert_eq!(report.question_feedback.len(), 1);
        // Question text always comes from the input, not the model.
        assert_eq!(report.question_feedback[0].question, "Q1");
        assert_eq!(report.question_feedback[0].score, 85);
        assert_eq!(report.question_feedback[0].difficulty, Difficulty::Medium);
        assert_eq!(report.question_feedback[0].key_points, qs(&["REST basics"]));
    }

    #[test]
    fn test_feedback_aligned_to_question_count() {
        // Model returned fewer entries than questions — missing ones default.
        let value = json!({
            "questionFeedback": [{"score": 90, "feedback": "Great."}]
        });
        let questions = qs(&["Q1", "Q2", "Q3"]);
        let answers = qs(&["A1", "A2", "A3"]);
        let report = normalize_feedback(&value, &questions, &answers);
        assert_eq!(report.question_feedback.len(), 3);
        assert_eq!(report.question_feedback[0].score, 90);
        assert_eq!(
            report.question_feedback[1].feedback,
            DEFAULT_QUESTION_FEEDBACK
        );
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let value = json!({
            "overallScore": 250,
            "questionFeedback": [{"score": -5, "feedback": "?"}]
        });
        let report = normalize_feedback(&value, &qs(&["Q1"]), &qs(&["A1"]));
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.question_feedback[0].score, 0);
    }

    #[test]
    fn test_fractional_scores_accepted() {
        let value = json!({"overallScore": 77.6});
        let report = normalize_feedback(&value, &qs(&["Q1"]), &qs(&["A1"]));
        assert_eq!(report.overall_score, 78);
    }

    #[test]
    fn test_missing_overall_score_uses_heuristic_band() {
        let report = normalize_feedback(&json!({}), &qs(&["Q1"]), &qs(&["short answer"]));
        assert!((65..95).contains(&report.overall_score));
    }

    #[test]
    fn test_difficulty_defaults_rotate_by_index() {
        let questions = qs(&["Q1", "Q2", "Q3", "Q4"]);
        let answers = qs(&["A", "A", "A", "A"]);
        let report = normalize_feedback(&json!({}), &questions, &answers);
        let difficulties: Vec<Difficulty> = report
            .question_feedback
            .iter()
            .map(|f| f.difficulty)
            .collect();
        assert_eq!(
            difficulties,
            vec![
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Easy
            ]
        );
    }

    #[test]
    fn test_difficulty_parsing_is_case_insensitive() {
        let value = json!({
            "questionFeedback": [{"difficulty": "HARD"}]
        });
        let report = normalize_feedback(&value, &qs(&["Q1"]), &qs(&["A1"]));
        assert_eq!(report.question_feedback[0].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_feedback_normalization_is_idempotent() {
        let value = json!({
            "overallScore": 70,
            "feedback": "ok",
            "questionFeedback": [{"score": 70, "feedback": "ok"}]
        });
        let questions = qs(&["Q1"]);
        let answers = qs(&["A1"]);
        let first = normalize_feedback(&value, &questions, &answers);
        let second = normalize_feedback(&value, &questions, &answers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_scores_within_bounds_for_arbitrary_input() {
        let value = json!({
            "overallScore": "not a number",
            "questionFeedback": [{"score": 99999}, {"score": null}, "garbage"]
        });
        let questions = qs(&["Q1", "Q2", "Q3"]);
        let answers = qs(&["A1"]);
        let report = normalize_feedback(&value, &questions, &answers);
        assert!(report.overall_score <= 100);
        for entry in &report.question_feedback {
            assert!(entry.score <= 100);
        }
    }
}
