use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),
}
