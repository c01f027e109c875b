//! practica-forms
//!
//! Questionnaire behaviour. Pure logic with no storage or HTTP dependency.
//! Defines, for each question type, how it is rendered, what shape its
//! answer takes, and how definitions and answers are checked. Also holds
//! the builder operations that keep question order dense.

pub mod builder;
pub mod duplicate;
pub mod error;
pub mod handlers;
pub mod render;
pub mod validation;

use practica_core::models::answer::Answer;
use practica_core::models::question::{Question, QuestionType};

use render::AnswerShape;

/// Trait implemented by each question type.
pub trait QuestionHandler: Send + Sync {
    /// The tag this handler is registered under.
    fn question_type(&self) -> QuestionType;

    /// Human-readable name shown in the builder palette.
    fn label(&self) -> &str;

    /// Front-end component that renders this question.
    fn component(&self) -> &str;

    /// Which answer field carries the value.
    fn answer_shape(&self) -> AnswerShape;

    /// Variant-specific problems with a question definition. Empty when valid.
    fn check_definition(&self, question: &Question) -> Vec<String>;

    /// Shape check for a non-empty answer of the matching type.
    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String>;

    /// Human-readable rendering of a non-empty answer for read-only views.
    fn display_answer(&self, question: &Question, answer: &Answer) -> String;
}

/// Return all registered question handlers, one per question type.
pub fn all_handlers() -> Vec<Box<dyn QuestionHandler>> {
    vec![
        Box::new(handlers::text::Text),
        Box::new(handlers::choice::SingleChoice),
        Box::new(handlers::choice::MultipleChoice),
        Box::new(handlers::numeric::Scale),
        Box::new(handlers::numeric::Slider),
        Box::new(handlers::date::Date),
        Box::new(handlers::file_upload::FileUpload),
        Box::new(handlers::yes_no::YesNo),
        Box::new(handlers::complaint::BodyComplaint),
        Box::new(handlers::complaint::HeadComplaint),
    ]
}

/// Look up the handler for a question type.
pub fn handler_for(question_type: QuestionType) -> Box<dyn QuestionHandler> {
    match question_type {
        QuestionType::Text => Box::new(handlers::text::Text),
        QuestionType::SingleChoice => Box::new(handlers::choice::SingleChoice),
        QuestionType::MultipleChoice => Box::new(handlers::choice::MultipleChoice),
        QuestionType::Scale => Box::new(handlers::numeric::Scale),
        QuestionType::Slider => Box::new(handlers::numeric::Slider),
        QuestionType::Date => Box::new(handlers::date::Date),
        QuestionType::FileUpload => Box::new(handlers::file_upload::FileUpload),
        QuestionType::YesNo => Box::new(handlers::yes_no::YesNo),
        QuestionType::BodyComplaint => Box::new(handlers::complaint::BodyComplaint),
        QuestionType::HeadComplaint => Box::new(handlers::complaint::HeadComplaint),
    }
}
