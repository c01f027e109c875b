//! Synchronous presence and shape checks.
//!
//! Errors are keyed by question id (or by field name for questionnaire-level
//! fields) so a form can show each message next to its input.

use std::collections::HashSet;

use practica_core::models::answer::Answer;
use practica_core::models::question::Question;
use practica_core::models::questionnaire::Questionnaire;

use crate::error::ValidationErrors;
use crate::handler_for;

pub const REQUIRED_MESSAGE: &str = "This question is required";

/// Check a set of answers against the questionnaire they respond to.
pub fn validate_answers(
    questionnaire: &Questionnaire,
    answers: &[Answer],
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut seen = HashSet::new();

    for answer in answers {
        let id = answer.question_id();
        let key = id.to_string();

        if !seen.insert(id) {
            errors.add(key, "Question answered more than once");
            continue;
        }

        let Some(question) = questionnaire.question(id) else {
            errors.add(key, "Answer refers to a question not in this questionnaire");
            continue;
        };

        if answer.question_type() != question.question_type() {
            errors.add(
                key,
                format!(
                    "Expected a {} answer, got {}",
                    question.question_type(),
                    answer.question_type()
                ),
            );
            continue;
        }

        if answer.is_empty() {
            continue;
        }

        if let Some(message) = handler_for(question.question_type()).check_answer(question, answer) {
            errors.add(key, message);
        }
    }

    for question in questionnaire.questions.iter().filter(|q| q.required) {
        let missing = answers
            .iter()
            .find(|a| a.question_id() == question.id)
            .is_none_or(Answer::is_empty);
        if missing {
            errors.add(question.id.to_string(), REQUIRED_MESSAGE);
        }
    }

    errors.into_result()
}

/// Check a questionnaire definition before it is saved.
pub fn validate_definition(questionnaire: &Questionnaire) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if questionnaire.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }

    let mut seen = HashSet::new();
    for question in &questionnaire.questions {
        let key = question.id.to_string();

        if !seen.insert(question.id) {
            errors.add(key, "Duplicate question id");
            continue;
        }

        let problems = question_problems(question);
        if !problems.is_empty() {
            errors.add(key, problems.join("; "));
        }
    }

    errors.into_result()
}

/// Check a standalone question definition, such as a question bank entry.
/// Problems are reported under the `question` key.
pub fn validate_question(question: &Question) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let problems = question_problems(question);
    if !problems.is_empty() {
        errors.add("question", problems.join("; "));
    }
    errors.into_result()
}

fn question_problems(question: &Question) -> Vec<String> {
    let mut problems = Vec::new();
    if question.question_text.trim().is_empty() {
        problems.push("question text is required".to_string());
    }
    problems.extend(handler_for(question.question_type()).check_definition(question));
    problems
}
