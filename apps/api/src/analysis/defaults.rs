//! Default-value table for the Shape Normalizer and Fallback Generator.
//!
//! Every field the normalizer can default is defined here, once, so defaults
//! are unit-testable in isolation. Scoring defaults are deterministic
//! length-based heuristics rather than random picks, so normalization is
//! idempotent and reproducible.

use crate::analysis::feedback::Difficulty;

pub const DEFAULT_JOB_TITLE: &str = "Software Developer";

pub const DEFAULT_SKILLS: &[&str] = &[
    "Programming",
    "Problem-solving",
    "Communication",
    "JavaScript",
    "React",
    "Node.js",
];

/// Generic interview questions used when the model provides none (or too
/// few). The normalizer cycles through this list to pad up to the requested
/// question count.
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "Tell me about your background in software development.",
    "Describe a challenging project you worked on and how you overcame technical obstacles.",
    "How do you stay updated with the latest programming trends and technologies?",
    "Can you explain the difference between RESTful and GraphQL APIs?",
    "What's your approach to debugging a complex application issue?",
    "What are your strengths and weaknesses related to this position?",
    "Describe a time you disagreed with a teammate about a technical decision.",
    "How do you approach writing tests for your code?",
    "Walk me through how you would design a simple URL shortener.",
    "Where do you see yourself professionally in 5 years?",
];

pub const DEFAULT_FEEDBACK_SUMMARY: &str = "Overall, your responses were clear and professional. \
    You effectively demonstrated your experience and skills, but could provide more specific \
    examples to support your claims.";

pub const DEFAULT_STRENGTHS: &[&str] = &[
    "Clear communication and professional tone",
    "Good understanding of the technical aspects of the role",
    "Positive attitude and enthusiasm",
];

pub const DEFAULT_AREAS_TO_IMPROVE: &[&str] = &[
    "Include more specific examples from your experience",
    "Elaborate more on quantifiable achievements",
    "Structure your responses with a clearer beginning, middle, and end",
];

pub const DEFAULT_QUESTION_FEEDBACK: &str =
    "Good response that could be enhanced with more specific examples.";

/// Score heuristic bounds for defaulted answers. [65, 95).
const SCORE_FLOOR: u32 = 65;
const SCORE_CEILING: u32 = 94;

/// Deterministic per-answer score used when the model supplies none:
/// longer answers score higher, one point per ten words, clamped to [65, 94].
pub fn heuristic_answer_score(answer: &str) -> u32 {
    let words = answer.split_whitespace().count() as u32;
    (SCORE_FLOOR + words / 10).min(SCORE_CEILING)
}

/// Deterministic overall score: the mean of the per-question scores, clamped
/// to the same [65, 94] band so a defaulted report never reads as a failure.
pub fn heuristic_overall_score(question_scores: &[u32]) -> u32 {
    if question_scores.is_empty() {
        return SCORE_FLOOR;
    }
    let mean = question_scores.iter().sum::<u32>() / question_scores.len() as u32;
    mean.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Deterministic difficulty for question `index` when the model supplies
/// none: Easy, Medium, Hard, repeating.
pub fn default_difficulty(index: usize) -> Difficulty {
    match index % 3 {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

/// Fills the question list up to `count` entries, cycling through
/// `DEFAULT_QUESTIONS` and skipping duplicates of what is already present.
pub fn pad_questions(mut questions: Vec<String>, count: usize) -> Vec<String> {
    let mut defaults = DEFAULT_QUESTIONS.iter().cycle();
    while questions.len() < count {
        // cycle() is infinite; unwrap is safe
        let candidate = *defaults.next().unwrap();
        if !questions.iter().any(|q| q == candidate) {
            questions.push(candidate.to_string());
        } else if questions.len() >= DEFAULT_QUESTIONS.len() {
            // Every default already present — allow repeats to reach count.
            questions.push(candidate.to_string());
        }
    }
    questions.truncate(count);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_questions_has_ten_entries() {
        assert_eq!(DEFAULT_QUESTIONS.len(), 10);
    }

    #[test]
    fn test_default_strengths_and_improvements_have_three_entries() {
        assert_eq!(DEFAULT_STRENGTHS.len(), 3);
        assert_eq!(DEFAULT_AREAS_TO_IMPROVE.len(), 3);
    }

    #[test]
    fn test_heuristic_score_floor_for_empty_answer() {
        assert_eq!(heuristic_answer_score(""), 65);
    }

    #[test]
    fn test_heuristic_score_grows_with_answer_length() {
        let short = heuristic_answer_score("I used Rust.");
        let long_answer = "word ".repeat(200);
        let long = heuristic_answer_score(&long_answer);
        assert!(long > short);
        assert!(long <= 94);
    }

    #[test]
    fn test_heuristic_score_is_deterministic() {
        let answer = "I led the migration of a monolith to services over two quarters.";
        assert_eq!(heuristic_answer_score(answer), heuristic_answer_score(answer));
    }

    #[test]
    fn test_overall_score_stays_in_band() {
        assert_eq!(heuristic_overall_score(&[]), 65);
        assert_eq!(heuristic_overall_score(&[0, 0, 0]), 65);
        assert_eq!(heuristic_overall_score(&[100, 100]), 94);
        let mid = heuristic_overall_score(&[70, 80]);
        assert_eq!(mid, 75);
    }

    #[test]
    fn test_difficulty_rotation() {
        assert_eq!(default_difficulty(0), Difficulty::Easy);
        assert_eq!(default_difficulty(1), Difficulty::Medium);
        assert_eq!(default_difficulty(2), Difficulty::Hard);
        assert_eq!(default_difficulty(3), Difficulty::Easy);
    }

    #[test]
    fn test_pad_questions_fills_to_count() {
        let padded = pad_questions(vec![], 10);
        assert_eq!(padded.len(), 10);
        assert_eq!(padded[0], DEFAULT_QUESTIONS[0]);
    }

    #[test]
    fn test_pad_questions_keeps_model_questions_first() {
        let padded = pad_questions(vec!["Why Rust?".to_string()], 3);
        assert_eq!(padded.len(), 3);
        assert_eq!(padded[0], "Why Rust?");
    }

    #[test]
    fn test_pad_questions_truncates_excess() {
        let many: Vec<String> = (0..15).map(|i| format!("Q{i}")).collect();
        assert_eq!(pad_questions(many, 10).len(), 10);
    }

    #[test]
    fn test_pad_questions_skips_duplicates_of_defaults() {
        let padded = pad_questions(vec![DEFAULT_QUESTIONS[0].to_string()], 10);
        assert_eq!(padded.len(), 10);
        let first_default_count = padded
            .iter()
            .filter(|q| q.as_str() == DEFAULT_QUESTIONS[0])
            .count();
        assert_eq!(first_default_count, 1);
    }
}
