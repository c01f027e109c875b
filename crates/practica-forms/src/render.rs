//! Render dispatch: question type → front-end component and answer shape.
//!
//! Used for data entry (public links, doctor-entered responses) and for
//! read-only previews of completed responses.

use std::str::FromStr;

use practica_core::models::question::QuestionType;
use practica_core::models::questionnaire::Questionnaire;
use practica_core::models::response::Response;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{all_handlers, handler_for};

/// Component used for tags no handler is registered for.
pub const UNSUPPORTED_COMPONENT: &str = "UnsupportedQuestion";

/// Placeholder shown in read-only views for unanswered questions.
pub const NO_ANSWER: &str = "No answer";

/// Which answer field carries the value for a question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerShape {
    Value,
    SelectedOption,
    SelectedOptions,
    Files,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComponentDescriptor {
    pub tag: String,
    pub label: String,
    pub component: String,
    /// `None` for the unsupported fallback.
    pub answer_shape: Option<AnswerShape>,
    pub supported: bool,
}

pub fn component_for(question_type: QuestionType) -> ComponentDescriptor {
    let handler = handler_for(question_type);
    ComponentDescriptor {
        tag: question_type.as_str().to_string(),
        label: handler.label().to_string(),
        component: handler.component().to_string(),
        answer_shape: Some(handler.answer_shape()),
        supported: true,
    }
}

/// Dispatch on a raw tag. Unknown tags get the unsupported fallback rather
/// than an error so a front end can still show something.
pub fn component_for_tag(tag: &str) -> ComponentDescriptor {
    match QuestionType::from_str(tag) {
        Ok(question_type) => component_for(question_type),
        Err(_) => ComponentDescriptor {
            tag: tag.to_string(),
            label: "Unsupported question".to_string(),
            component: UNSUPPORTED_COMPONENT.to_string(),
            answer_shape: None,
            supported: false,
        },
    }
}

/// Every registered question type, in palette order.
pub fn catalog() -> Vec<ComponentDescriptor> {
    all_handlers()
        .iter()
        .map(|h| component_for(h.question_type()))
        .collect()
}

/// One question prepared for data entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedField {
    pub question_id: Uuid,
    pub order: u32,
    pub question_text: String,
    pub required: bool,
    pub question_type: QuestionType,
    pub component: String,
    pub answer_shape: AnswerShape,
    /// Variant payload (options, bounds, regions, …) without the tag.
    pub props: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedForm {
    pub questionnaire_id: Uuid,
    pub title: String,
    pub description: String,
    pub fields: Vec<RenderedField>,
}

pub fn render_form(questionnaire: &Questionnaire) -> RenderedForm {
    let mut questions: Vec<_> = questionnaire.questions.iter().collect();
    questions.sort_by_key(|q| q.order);

    let fields = questions
        .into_iter()
        .map(|question| {
            let handler = handler_for(question.question_type());
            let mut props = serde_json::to_value(&question.kind).unwrap_or_default();
            if let Some(obj) = props.as_object_mut() {
                obj.remove("question_type");
            }

            RenderedField {
                question_id: question.id,
                order: question.order,
                question_text: question.question_text.clone(),
                required: question.required,
                question_type: question.question_type(),
                component: handler.component().to_string(),
                answer_shape: handler.answer_shape(),
                props,
            }
        })
        .collect();

    RenderedForm {
        questionnaire_id: questionnaire.id,
        title: questionnaire.title.clone(),
        description: questionnaire.description.clone(),
        fields,
    }
}

/// One question with its answer, for read-only display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedAnswer {
    pub question_id: Uuid,
    pub order: u32,
    pub question_text: String,
    pub question_type: QuestionType,
    pub answered: bool,
    pub display: String,
}

pub fn render_answers(questionnaire: &Questionnaire, response: &Response) -> Vec<RenderedAnswer> {
    let mut questions: Vec<_> = questionnaire.questions.iter().collect();
    questions.sort_by_key(|q| q.order);

    questions
        .into_iter()
        .map(|question| {
            let display = response
                .answer_for(question.id)
                .filter(|a| a.question_type() == question.question_type() && !a.is_empty())
                .map(|a| handler_for(question.question_type()).display_answer(question, a))
                .filter(|d| !d.is_empty());

            RenderedAnswer {
                question_id: question.id,
                order: question.order,
                question_text: question.question_text.clone(),
                question_type: question.question_type(),
                answered: display.is_some(),
                display: display.unwrap_or_else(|| NO_ANSWER.to_string()),
            }
        })
        .collect()
}
