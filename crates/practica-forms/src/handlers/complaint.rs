use practica_core::models::answer::Answer;
use practica_core::models::question::{AnatomicalRegion, Question, QuestionKind, QuestionType};

use super::check_selectable_ids;
use crate::QuestionHandler;
use crate::render::AnswerShape;

/// Region picker over a full-body diagram.
pub struct BodyComplaint;

/// Region picker over a head and face diagram.
pub struct HeadComplaint;

fn regions_of(question: &Question) -> Option<&[AnatomicalRegion]> {
    match &question.kind {
        QuestionKind::BodyComplaint { regions } | QuestionKind::HeadComplaint { regions } => {
            Some(regions.as_slice())
        }
        _ => None,
    }
}

fn selected_of(answer: &Answer) -> Option<&[String]> {
    match answer {
        Answer::BodyComplaint {
            selected_options, ..
        }
        | Answer::HeadComplaint {
            selected_options, ..
        } => Some(selected_options.as_slice()),
        _ => None,
    }
}

fn check_regions(question: &Question) -> Vec<String> {
    match regions_of(question) {
        Some(regions) => check_selectable_ids("region", regions.iter().map(|r| r.id.as_str())),
        None => Vec::new(),
    }
}

fn check_selection(question: &Question, answer: &Answer) -> Option<String> {
    let regions = regions_of(question)?;
    let selected = selected_of(answer)?;

    let unknown: Vec<&str> = selected
        .iter()
        .filter(|s| !regions.iter().any(|r| &r.id == *s))
        .map(String::as_str)
        .collect();

    (!unknown.is_empty()).then(|| format!("Unknown region(s): {}", unknown.join(", ")))
}

fn display_selection(question: &Question, answer: &Answer) -> String {
    let (Some(regions), Some(selected)) = (regions_of(question), selected_of(answer)) else {
        return String::new();
    };

    selected
        .iter()
        .map(|s| {
            regions
                .iter()
                .find(|r| &r.id == s)
                .map(|r| r.label.as_str())
                .unwrap_or(s.as_str())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl QuestionHandler for BodyComplaint {
    fn question_type(&self) -> QuestionType {
        QuestionType::BodyComplaint
    }

    fn label(&self) -> &str {
        "Body complaint map"
    }

    fn component(&self) -> &str {
        "BodyMapQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::SelectedOptions
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        check_regions(question)
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        check_selection(question, answer)
    }

    fn display_answer(&self, question: &Question, answer: &Answer) -> String {
        display_selection(question, answer)
    }
}

impl QuestionHandler for HeadComplaint {
    fn question_type(&self) -> QuestionType {
        QuestionType::HeadComplaint
    }

    fn label(&self) -> &str {
        "Head complaint map"
    }

    fn component(&self) -> &str {
        "HeadMapQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::SelectedOptions
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        check_regions(question)
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        check_selection(question, answer)
    }

    fn display_answer(&self, question: &Question, answer: &Answer) -> String {
        display_selection(question, answer)
    }
}
