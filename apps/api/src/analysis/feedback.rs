//! Interview feedback pipeline.
//!
//! Flow: prompt escalation list → model call → extract JSON → normalize.
//! When every JSON-shaped attempt fails, a secondary generation level fetches
//! strengths / summary / improvements as three plain-text model calls awaited
//! in parallel (no ordering dependency), each independently defaulting on
//! failure. The final assembly is hardcoded and infallible, so callers always
//! receive a fully-populated `FeedbackReport`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::defaults::{
    default_difficulty, heuristic_answer_score, heuristic_overall_score, DEFAULT_AREAS_TO_IMPROVE,
    DEFAULT_FEEDBACK_SUMMARY, DEFAULT_QUESTION_FEEDBACK, DEFAULT_STRENGTHS,
};
use crate::analysis::normalize::normalize_feedback;
use crate::analysis::prompts::{
    feedback_prompts, format_qa_pairs, improvements_fallback_prompt, strengths_fallback_prompt,
    summary_fallback_prompt, FEEDBACK_SYSTEM,
};
use crate::llm_client::extract::extract_value;
use crate::llm_client::prompts::PLAIN_LIST_SYSTEM;
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question: String,
    /// 0–100.
    pub score: u32,
    pub feedback: String,
    pub difficulty: Difficulty,
    pub key_points: Vec<String>,
}

/// Full feedback for a completed interview. Invariants: `overall_score` and
/// every per-question score are in [0, 100]; `question_feedback` is
/// index-aligned with the input questions (same length).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub overall_score: u32,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub question_feedback: Vec<QuestionFeedback>,
}

/// Analyzes a question/answer set and produces scored feedback.
///
/// Never fails: the escalation chain, the parallel plain-text fallback, and
/// the hardcoded assembly absorb every model failure in turn.
pub async fn analyze_feedback(
    llm: &dyn TextGenerator,
    questions: &[String],
    answers: &[String],
    job_title: Option<&str>,
    years_experience: Option<u8>,
) -> FeedbackReport {
    let prompts = feedback_prompts(questions, answers, job_title, years_experience);

    for (level, prompt) in prompts.iter().enumerate() {
        match llm.generate(prompt, FEEDBACK_SYSTEM).await {
            Ok(text) => match extract_value(&text) {
                Ok(value) => {
                    debug!("feedback analysis succeeded at escalation level {level}");
                    return normalize_feedback(&value, questions, answers);
                }
                Err(e) => {
                    warn!("feedback analysis level {level}: unusable model output: {e}");
                }
            },
            Err(e) => {
                warn!("feedback analysis level {level}: model call failed: {e}");
            }
        }
    }

    info!("feedback analysis fell through all JSON levels; assembling from plain-text fallbacks");
    fallback_feedback(llm, questions, answers).await
}

/// Secondary generation level: three simplified plain-text calls awaited in
/// parallel, each defaulting independently, assembled around heuristic
/// per-answer scores.
async fn fallback_feedback(
    llm: &dyn TextGenerator,
    questions: &[String],
    answers: &[String],
) -> FeedbackReport {
    let pairs = format_qa_pairs(questions, answers);

    let strengths_prompt = strengths_fallback_prompt(&pairs);
    let summary_prompt = summary_fallback_prompt(&pairs);
    let improvements_prompt = improvements_fallback_prompt(&pairs);

    let (strengths, summary, improvements) = tokio::join!(
        plain_list(llm, &strengths_prompt, DEFAULT_STRENGTHS),
        plain_text(llm, &summary_prompt, DEFAULT_FEEDBACK_SUMMARY),
        plain_list(llm, &improvements_prompt, DEFAULT_AREAS_TO_IMPROVE),
    );

    let question_feedback: Vec<QuestionFeedback> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = answers.get(i).map(String::as_str).unwrap_or("");
            QuestionFeedback {
                question: question.clone(),
                score: heuristic_answer_score(answer),
                feedback: DEFAULT_QUESTION_FEEDBACK.to_string(),
                difficulty: default_difficulty(i),
                key_points: Vec::new(),
            }
        })
        .collect();

    let scores: Vec<u32> = question_feedback.iter().map(|f| f.score).collect();

    FeedbackReport {
        overall_score: heuristic_overall_score(&scores),
        feedback: summary,
        strengths,
        areas_to_improve: improvements,
        question_feedback,
    }
}

/// Best-effort plain-text call: defaults on any model failure or blank output.
async fn plain_text(llm: &dyn TextGenerator, prompt: &str, default: &str) -> String {
    match llm.generate(prompt, PLAIN_LIST_SYSTEM).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => default.to_string(),
        Err(e) => {
            warn!("plain-text fallback call failed: {e}");
            default.to_string()
        }
    }
}

/// Best-effort plain-list call: parses one item per line, stripping list
/// markers; defaults when nothing usable comes back.
async fn plain_list(llm: &dyn TextGenerator, prompt: &str, defaults: &[&str]) -> Vec<String> {
    let items: Vec<String> = match llm.generate(prompt, PLAIN_LIST_SYSTEM).await {
        Ok(text) => parse_list_lines(&text),
        Err(e) => {
            warn!("plain-list fallback call failed: {e}");
            Vec::new()
        }
    };

    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

/// One item per line; tolerates the bullet/numbering markers the model adds
/// despite instructions.
fn parse_list_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches(['.', ')'])
                .trim()
        })
        .filter(|line| !line.is_empty())
        .take(3)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{FailingModel, ScriptedModel};

    fn qs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_well_formed_response_is_used_directly() {
        let model = ScriptedModel::new(vec![
            r#"{"overallScore": 82, "feedback": "Good interview.",
                "strengths": ["Clarity", "Depth", "Calm"],
                "areasToImprove": ["Examples", "Structure", "Brevity"],
                "questionFeedback": [
                    {"question": "Q1", "score": 85, "feedback": "Nice.", "difficulty": "Easy"},
                    {"question": "Q2", "score": 79, "feedback": "Ok."}
                ]}"#,
        ]);
        let questions = qs(&["Q1", "Q2"]);
        let answers = qs(&["A1", "A2"]);
        let report = analyze_feedback(&model, &questions, &answers, None, None).await;
        assert_eq!(report.overall_score, 82);
        assert_eq!(report.question_feedback.len(), 2);
        assert_eq!(report.question_feedback[1].score, 79);
    }

    #[tokio::test]
    async fn test_always_rejecting_model_still_resolves() {
        let questions = qs(&["Q1"]);
        let answers = qs(&["A1"]);
        let report = analyze_feedback(&FailingModel, &questions, &answers, None, None).await;
        assert!((60..=100).contains(&report.overall_score));
        assert_eq!(report.question_feedback.len(), 1);
        assert_eq!(report.question_feedback[0].question, "Q1");
        assert_eq!(report.strengths.len(), 3);
        assert_eq!(report.areas_to_improve.len(), 3);
    }

    #[tokio::test]
    async fn test_feedback_length_matches_questions_for_equal_length_inputs() {
        let questions = qs(&["Q1", "Q2", "Q3", "Q4"]);
        let answers = qs(&["A1", "A2", "A3", "A4"]);
        let report = analyze_feedback(&FailingModel, &questions, &answers, None, None).await;
        assert_eq!(report.question_feedback.len(), questions.len());
        for entry in &report.question_feedback {
            assert!(entry.score <= 100);
        }
    }

    #[tokio::test]
    async fn test_plain_text_fallback_level_is_used() {
        // Three JSON attempts yield prose, then the three parallel plain
        // calls succeed (order of the parallel prompts is not guaranteed, so
        // every response parses as both a list and a summary).
        let model = ScriptedModel::new(vec![
            "no json",
            "no json",
            "no json",
            "Communicates clearly\nKnows the stack\nStays calm",
            "Communicates clearly\nKnows the stack\nStays calm",
            "Communicates clearly\nKnows the stack\nStays calm",
        ]);
        let questions = qs(&["Q1"]);
        let answers = qs(&["A long and thoughtful answer about systems design."]);
        let report = analyze_feedback(&model, &questions, &answers, None, None).await;
        assert_eq!(report.strengths, qs(&["Communicates clearly", "Knows the stack", "Stays calm"]));
        assert!((65..95).contains(&report.overall_score));
    }

    #[tokio::test]
    async fn test_gap_answers_are_tolerated() {
        let questions = qs(&["Q1", "Q2"]);
        let answers = qs(&["A1"]); // second answer missing
        let report = analyze_feedback(&FailingModel, &questions, &answers, None, None).await;
        assert_eq!(report.question_feedback.len(), 2);
        // Missing answer scores at the heuristic floor.
        assert_eq!(report.question_feedback[1].score, 65);
    }

    #[tokio::test]
    async fn test_report_survives_json_round_trip() {
        let questions = qs(&["Q1", "Q2"]);
        let answers = qs(&["A1", "A2"]);
        let report = analyze_feedback(&FailingModel, &questions, &answers, None, None).await;

        let stored = serde_json::to_string(&report).unwrap();
        let reread: FeedbackReport = serde_json::from_str(&stored).unwrap();

        assert_eq!(reread.overall_score, report.overall_score);
        assert_eq!(
            reread.question_feedback.len(),
            report.question_feedback.len()
        );
        assert_eq!(reread, report);
    }

    #[test]
    fn test_parse_list_lines_strips_markers() {
        let parsed = parse_list_lines("1. First item\n- Second item\n* Third item\n");
        assert_eq!(parsed, qs(&["First item", "Second item", "Third item"]));
    }

    #[test]
    fn test_parse_list_lines_caps_at_three() {
        let parsed = parse_list_lines("a\nb\nc\nd\ne");
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_parse_list_lines_empty_input() {
        assert!(parse_list_lines("   \n  \n").is_empty());
    }
}
