use practica_core::models::answer::Answer;
use practica_core::models::question::{Question, QuestionKind, QuestionType};

use super::on_step;
use crate::QuestionHandler;
use crate::render::AnswerShape;

/// Integer rating scale with optional per-value captions.
pub struct Scale;

/// Continuous range on a fixed step, e.g. temperature or weight.
pub struct Slider;

impl QuestionHandler for Scale {
    fn question_type(&self) -> QuestionType {
        QuestionType::Scale
    }

    fn label(&self) -> &str {
        "Numeric scale"
    }

    fn component(&self) -> &str {
        "ScaleQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::Value
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        let QuestionKind::Scale { min, max, labels } = &question.kind else {
            return Vec::new();
        };

        let mut problems = Vec::new();
        if min >= max {
            problems.push(format!("min ({min}) must be less than max ({max})"));
        }
        for key in labels.keys() {
            match key.parse::<i32>() {
                Ok(v) if (*min..=*max).contains(&v) => {}
                _ => problems.push(format!("label key '{key}' is not a value on the scale")),
            }
        }
        problems
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::Scale { min, max, .. },
            Answer::Scale {
                value: Some(value), ..
            },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        (!(*min..=*max).contains(value)).then(|| format!("Must be between {min} and {max}"))
    }

    fn display_answer(&self, question: &Question, answer: &Answer) -> String {
        match (&question.kind, answer) {
            (
                QuestionKind::Scale { labels, .. },
                Answer::Scale {
                    value: Some(value), ..
                },
            ) => match labels.get(&value.to_string()) {
                Some(caption) => format!("{value} ({caption})"),
                None => value.to_string(),
            },
            _ => String::new(),
        }
    }
}

impl QuestionHandler for Slider {
    fn question_type(&self) -> QuestionType {
        QuestionType::Slider
    }

    fn label(&self) -> &str {
        "Slider"
    }

    fn component(&self) -> &str {
        "SliderQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::Value
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        let QuestionKind::Slider { min, max, step, .. } = &question.kind else {
            return Vec::new();
        };

        let mut problems = Vec::new();
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            problems.push("min, max and step must be finite numbers".to_string());
            return problems;
        }
        if min >= max {
            problems.push(format!("min ({min}) must be less than max ({max})"));
        }
        if *step <= 0.0 {
            problems.push("step must be positive".to_string());
        } else if *step > max - min {
            problems.push("step must not exceed the slider range".to_string());
        }
        problems
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::Slider { min, max, step, .. },
            Answer::Slider {
                value: Some(value), ..
            },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        if !value.is_finite() || value < min || value > max {
            return Some(format!("Must be between {min} and {max}"));
        }
        if *step > 0.0 && !on_step(*value, *min, *step) {
            return Some(format!("Must be a multiple of {step} from {min}"));
        }
        None
    }

    fn display_answer(&self, question: &Question, answer: &Answer) -> String {
        match (&question.kind, answer) {
            (
                QuestionKind::Slider { unit, .. },
                Answer::Slider {
                    value: Some(value), ..
                },
            ) => match unit {
                Some(unit) => format!("{value} {unit}"),
                None => value.to_string(),
            },
            _ => String::new(),
        }
    }
}
