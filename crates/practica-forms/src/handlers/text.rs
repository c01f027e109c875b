use practica_core::models::answer::Answer;
use practica_core::models::question::{Question, QuestionKind, QuestionType};

use crate::QuestionHandler;
use crate::render::AnswerShape;

/// Free text, rendered as an input or a textarea when `multiline` is set.
pub struct Text;

impl QuestionHandler for Text {
    fn question_type(&self) -> QuestionType {
        QuestionType::Text
    }

    fn label(&self) -> &str {
        "Free text"
    }

    fn component(&self) -> &str {
        "TextQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::Value
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        match &question.kind {
            QuestionKind::Text {
                max_length: Some(0),
                ..
            } => vec!["max_length must be at least 1".to_string()],
            _ => Vec::new(),
        }
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::Text {
                max_length: Some(max),
                ..
            },
            Answer::Text { value, .. },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        let len = value.chars().count();
        (len > *max as usize).then(|| format!("Must be at most {max} characters (got {len})"))
    }

    fn display_answer(&self, _question: &Question, answer: &Answer) -> String {
        match answer {
            Answer::Text { value, .. } => value.trim().to_string(),
            _ => String::new(),
        }
    }
}
