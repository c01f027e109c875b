use practica_core::models::answer::Answer;
use practica_core::models::question::{Question, QuestionType};

use crate::QuestionHandler;
use crate::render::AnswerShape;

pub struct YesNo;

impl QuestionHandler for YesNo {
    fn question_type(&self) -> QuestionType {
        QuestionType::YesNo
    }

    fn label(&self) -> &str {
        "Yes / No"
    }

    fn component(&self) -> &str {
        "YesNoQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::Value
    }

    fn check_definition(&self, _question: &Question) -> Vec<String> {
        Vec::new()
    }

    fn check_answer(&self, _question: &Question, _answer: &Answer) -> Option<String> {
        None
    }

    fn display_answer(&self, _question: &Question, answer: &Answer) -> String {
        match answer {
            Answer::YesNo {
                value: Some(true), ..
            } => "Yes".to_string(),
            Answer::YesNo {
                value: Some(false), ..
            } => "No".to_string(),
            _ => String::new(),
        }
    }
}
