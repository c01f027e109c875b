use practica_core::models::answer::Answer;
use practica_core::models::question::{Question, QuestionKind, QuestionType};

use crate::QuestionHandler;
use crate::render::AnswerShape;

/// Calendar date picker with optional bounds.
pub struct Date;

impl QuestionHandler for Date {
    fn question_type(&self) -> QuestionType {
        QuestionType::Date
    }

    fn label(&self) -> &str {
        "Date"
    }

    fn component(&self) -> &str {
        "DateQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::Value
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        match &question.kind {
            QuestionKind::Date {
                min_date: Some(min),
                max_date: Some(max),
            } if min > max => vec![format!("min_date ({min}) is after max_date ({max})")],
            _ => Vec::new(),
        }
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::Date { min_date, max_date },
            Answer::Date {
                value: Some(value), ..
            },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        if let Some(min) = min_date
            && value < min
        {
            return Some(format!("Must be on or after {min}"));
        }
        if let Some(max) = max_date
            && value > max
        {
            return Some(format!("Must be on or before {max}"));
        }
        None
    }

    fn display_answer(&self, _question: &Question, answer: &Answer) -> String {
        match answer {
            Answer::Date {
                value: Some(value), ..
            } => value.to_string(),
            _ => String::new(),
        }
    }
}
