//! All model prompt construction for the Analysis module.
//!
//! Prompt escalation is an explicit ordered list (full → simplified →
//! minimal) consumed by a single retry loop in the pipeline, so the policy
//! is visible and testable instead of duplicated inline at each call site.
//! Builders are pure functions of their inputs — no I/O, never fail.

use crate::llm_client::prompts::truncate_chars;

/// Number of prompt variants per operation. The pipelines make at most this
/// many JSON-shaped model attempts before falling back.
pub const ESCALATION_LEVELS: usize = 3;

/// CV text is truncated to this many characters for simplified retry prompts.
pub const RETRY_CV_MAX_CHARS: usize = 1000;

/// System prompt for CV analysis — enforces JSON-only output.
pub const CV_ANALYSIS_SYSTEM: &str = "You are an expert CV analyst and technical recruiter. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// System prompt for interview feedback — enforces JSON-only output.
pub const FEEDBACK_SYSTEM: &str =
    "You are an expert interview coach specializing in technical interviews. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

// ────────────────────────────────────────────────────────────────────────────
// CV analysis
// ────────────────────────────────────────────────────────────────────────────

/// Builds the ordered CV-analysis prompt escalation list.
///
/// Level 0: full CV, full instructions.
/// Level 1: CV truncated to `RETRY_CV_MAX_CHARS`, compressed instructions.
/// Level 2: no CV text at all — generic questions for the experience level.
pub fn cv_analysis_prompts(
    cv_text: &str,
    years_experience: u8,
    question_count: usize,
) -> Vec<String> {
    let full = format!(
        r#"Analyze this CV text and extract the following information:
1. The most likely job title based on experience (be very specific; if it's a developer, specify what kind)
2. A list of 5-10 key skills mentioned
3. Generate {question_count} interview questions specifically tailored for this candidate, considering their {years_experience} years of experience. Make at least half of these questions technical and specific to their field.

Format the response as JSON with 'jobTitle' (string), 'skills' (array of strings), and 'questions' (array of strings) properties.

CV Text:
{cv_text}"#
    );

    let simplified = format!(
        r#"Extract a job title, key skills, and {question_count} interview questions from this CV excerpt (candidate has {years_experience} years of experience).

Respond as JSON: {{"jobTitle": string, "skills": [string], "questions": [string]}}

CV excerpt:
{excerpt}"#,
        excerpt = truncate_chars(cv_text, RETRY_CV_MAX_CHARS),
    );

    let minimal = format!(
        r#"Generate {question_count} interview questions for a software candidate with {years_experience} years of experience.

Respond as JSON: {{"jobTitle": string, "skills": [string], "questions": [string]}}"#
    );

    let prompts = vec![full, simplified, minimal];
    debug_assert_eq!(prompts.len(), ESCALATION_LEVELS);
    prompts
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback analysis
// ────────────────────────────────────────────────────────────────────────────

/// Formats index-aligned question/answer pairs for embedding in a prompt.
/// Missing answers become "No answer provided".
pub fn format_qa_pairs(questions: &[String], answers: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = answers
                .get(i)
                .map(String::as_str)
                .filter(|a| !a.trim().is_empty())
                .unwrap_or("No answer provided");
            format!("Question {n}: {q}\nAnswer {n}: {answer}", n = i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the ordered feedback-analysis prompt escalation list.
///
/// Level 0: full evaluation with per-question difficulty and key points.
/// Level 1: same pairs, reduced shape (no difficulty/keyPoints).
/// Level 2: overall evaluation only — per-question fields are defaulted by
/// the normalizer.
pub fn feedback_prompts(
    questions: &[String],
    answers: &[String],
    job_title: Option<&str>,
    years_experience: Option<u8>,
) -> Vec<String> {
    let pairs = format_qa_pairs(questions, answers);
    let role = match (job_title, years_experience) {
        (Some(title), Some(years)) => {
            format!("The candidate interviewed for a {title} role and has {years} years of experience.\n\n")
        }
        (Some(title), None) => format!("The candidate interviewed for a {title} role.\n\n"),
        (None, Some(years)) => format!("The candidate has {years} years of experience.\n\n"),
        (None, None) => String::new(),
    };

    let full = format!(
        r#"{role}Analyze these interview answers and provide detailed feedback.

{pairs}

Provide an evaluation in JSON format with the following structure:
{{
  "overallScore": (number between 0-100),
  "feedback": (general feedback summary),
  "strengths": [list of 3 main strengths],
  "areasToImprove": [list of 3 areas for improvement],
  "questionFeedback": [
    {{
      "question": (the question text),
      "score": (number between 0-100),
      "feedback": (specific technical feedback for this answer),
      "difficulty": ("Easy", "Medium" or "Hard"),
      "keyPoints": [points a strong answer would cover]
    }},
    ...one entry per question, in order
  ]
}}

For technical questions, provide specific feedback on the accuracy and depth of technical knowledge."#
    );

    let simplified = format!(
        r#"Score these interview answers.

{pairs}

Respond as JSON: {{"overallScore": number, "feedback": string, "strengths": [string], "areasToImprove": [string], "questionFeedback": [{{"question": string, "score": number, "feedback": string}}]}}"#
    );

    let minimal = format!(
        r#"Give an overall evaluation of this interview in JSON: {{"overallScore": number between 0 and 100, "feedback": string}}

{pairs}"#
    );

    let prompts = vec![full, simplified, minimal];
    debug_assert_eq!(prompts.len(), ESCALATION_LEVELS);
    prompts
}

// ────────────────────────────────────────────────────────────────────────────
// Plain-text fallback prompts (secondary generation level)
// ────────────────────────────────────────────────────────────────────────────

pub fn strengths_fallback_prompt(pairs: &str) -> String {
    format!("List the 3 main strengths shown in these interview answers, one per line:\n\n{pairs}")
}

pub fn summary_fallback_prompt(pairs: &str) -> String {
    format!("Write a 2-3 sentence overall feedback summary for this interview:\n\n{pairs}")
}

pub fn improvements_fallback_prompt(pairs: &str) -> String {
    format!("List the 3 main areas to improve in these interview answers, one per line:\n\n{pairs}")
}
