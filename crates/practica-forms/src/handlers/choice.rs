use practica_core::models::answer::Answer;
use practica_core::models::question::{ChoiceOption, Question, QuestionKind, QuestionType};

use super::check_selectable_ids;
use crate::QuestionHandler;
use crate::render::AnswerShape;

/// One option out of a list, rendered as radio buttons.
pub struct SingleChoice;

/// Any number of options out of a list, rendered as checkboxes.
pub struct MultipleChoice;

fn label_for<'a>(options: &'a [ChoiceOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
        .unwrap_or(value)
}

fn unknown_options<'a>(options: &[ChoiceOption], selected: &'a [String]) -> Vec<&'a str> {
    selected
        .iter()
        .filter(|s| !options.iter().any(|o| &o.value == *s))
        .map(String::as_str)
        .collect()
}

impl QuestionHandler for SingleChoice {
    fn question_type(&self) -> QuestionType {
        QuestionType::SingleChoice
    }

    fn label(&self) -> &str {
        "Single choice"
    }

    fn component(&self) -> &str {
        "RadioGroupQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::SelectedOption
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        let QuestionKind::SingleChoice { options } = &question.kind else {
            return Vec::new();
        };
        check_selectable_ids("option", options.iter().map(|o| o.value.as_str()))
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::SingleChoice { options },
            Answer::SingleChoice {
                selected_option: Some(selected),
                ..
            },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        (!options.iter().any(|o| &o.value == selected))
            .then(|| format!("'{selected}' is not one of the available options"))
    }

    fn display_answer(&self, question: &Question, answer: &Answer) -> String {
        match (&question.kind, answer) {
            (
                QuestionKind::SingleChoice { options },
                Answer::SingleChoice {
                    selected_option: Some(selected),
                    ..
                },
            ) => label_for(options, selected).to_string(),
            _ => String::new(),
        }
    }
}

impl QuestionHandler for MultipleChoice {
    fn question_type(&self) -> QuestionType {
        QuestionType::MultipleChoice
    }

    fn label(&self) -> &str {
        "Multiple choice"
    }

    fn component(&self) -> &str {
        "CheckboxGroupQuestion"
    }

    fn answer_shape(&self) -> AnswerShape {
        AnswerShape::SelectedOptions
    }

    fn check_definition(&self, question: &Question) -> Vec<String> {
        let QuestionKind::MultipleChoice {
            options,
            min_selections,
            max_selections,
        } = &question.kind
        else {
            return Vec::new();
        };

        let mut problems = check_selectable_ids("option", options.iter().map(|o| o.value.as_str()));

        if let (Some(min), Some(max)) = (min_selections, max_selections)
            && min > max
        {
            problems.push(format!("min_selections ({min}) exceeds max_selections ({max})"));
        }
        for (name, bound) in [("min_selections", min_selections), ("max_selections", max_selections)] {
            if let Some(bound) = bound
                && *bound as usize > options.len()
            {
                problems.push(format!(
                    "{name} ({bound}) exceeds the number of options ({})",
                    options.len()
                ));
            }
        }
        problems
    }

    fn check_answer(&self, question: &Question, answer: &Answer) -> Option<String> {
        let (
            QuestionKind::MultipleChoice {
                options,
                min_selections,
                max_selections,
            },
            Answer::MultipleChoice {
                selected_options, ..
            },
        ) = (&question.kind, answer)
        else {
            return None;
        };

        let unknown = unknown_options(options, selected_options);
        if !unknown.is_empty() {
            return Some(format!("Unknown option(s): {}", unknown.join(", ")));
        }

        let mut distinct: Vec<&String> = selected_options.iter().collect();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != selected_options.len() {
            return Some("Each option may only be selected once".to_string());
        }

        let count = selected_options.len();
        if let Some(min) = min_selections
            && count < *min as usize
        {
            return Some(format!("Select at least {min} option(s)"));
        }
        if let Some(max) = max_selections
            && count > *max as usize
        {
            return Some(format!("Select at most {max} option(s)"));
        }
        None
    }

    fn display_answer(&self, question: &Question, answer: &Answer) -> String {
        match (&question.kind, answer) {
            (
                QuestionKind::MultipleChoice { options, .. },
                Answer::MultipleChoice {
                    selected_options, ..
                },
            ) => selected_options
                .iter()
                .map(|s| label_for(options, s))
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }
}
