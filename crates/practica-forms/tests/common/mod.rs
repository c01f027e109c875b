#![allow(dead_code)]

use std::collections::BTreeMap;

use practica_core::models::question::{
    AnatomicalRegion, ChoiceOption, Question, QuestionKind,
};
use practica_core::models::questionnaire::Questionnaire;
use uuid::Uuid;

pub fn text(prompt: &str, required: bool) -> Question {
    Question::new(
        prompt,
        required,
        QuestionKind::Text {
            placeholder: None,
            multiline: false,
            max_length: Some(20),
        },
    )
}

pub fn single_choice(prompt: &str, required: bool) -> Question {
    Question::new(
        prompt,
        required,
        QuestionKind::SingleChoice {
            options: vec![
                ChoiceOption::new("never", "Never"),
                ChoiceOption::new("sometimes", "Sometimes"),
                ChoiceOption::new("daily", "Daily"),
            ],
        },
    )
}

pub fn multiple_choice(prompt: &str) -> Question {
    Question::new(
        prompt,
        false,
        QuestionKind::MultipleChoice {
            options: vec![
                ChoiceOption::new("fever", "Fever"),
                ChoiceOption::new("cough", "Cough"),
                ChoiceOption::new("fatigue", "Fatigue"),
            ],
            min_selections: Some(1),
            max_selections: Some(2),
        },
    )
}

pub fn scale(prompt: &str) -> Question {
    let mut labels = BTreeMap::new();
    labels.insert("0".to_string(), "No pain".to_string());
    labels.insert("10".to_string(), "Worst pain".to_string());
    Question::new(prompt, true, QuestionKind::Scale { min: 0, max: 10, labels })
}

pub fn slider(prompt: &str) -> Question {
    Question::new(
        prompt,
        false,
        QuestionKind::Slider {
            min: 35.0,
            max: 42.0,
            step: 0.5,
            unit: Some("°C".to_string()),
        },
    )
}

pub fn date(prompt: &str) -> Question {
    Question::new(
        prompt,
        false,
        QuestionKind::Date {
            min_date: Some(jiff::civil::date(2000, 1, 1)),
            max_date: Some(jiff::civil::date(2030, 12, 31)),
        },
    )
}

pub fn file_upload(prompt: &str) -> Question {
    Question::new(
        prompt,
        false,
        QuestionKind::FileUpload {
            accepted_file_types: vec!["image/*".to_string(), ".pdf".to_string()],
            max_files: 2,
        },
    )
}

pub fn yes_no(prompt: &str, required: bool) -> Question {
    Question::new(prompt, required, QuestionKind::YesNo {})
}

pub fn body_complaint(prompt: &str) -> Question {
    Question::new(
        prompt,
        false,
        QuestionKind::BodyComplaint {
            regions: vec![
                AnatomicalRegion::new("lower_back", "Lower back"),
                AnatomicalRegion::new("left_knee", "Left knee"),
            ],
        },
    )
}

pub fn head_complaint(prompt: &str) -> Question {
    Question::new(
        prompt,
        false,
        QuestionKind::HeadComplaint {
            regions: vec![
                AnatomicalRegion::new("forehead", "Forehead"),
                AnatomicalRegion::new("jaw", "Jaw"),
            ],
        },
    )
}

pub fn questionnaire(questions: Vec<Question>) -> Questionnaire {
    let now = jiff::Timestamp::now();
    let mut questions = questions;
    for (i, q) in questions.iter_mut().enumerate() {
        q.order = i as u32;
    }
    Questionnaire {
        id: Uuid::new_v4(),
        doctor_id: "doctor-1".to_string(),
        title: "New patient intake".to_string(),
        description: "Before your first visit".to_string(),
        category: Some("intake".to_string()),
        specialty: Some("general".to_string()),
        questions,
        is_active: true,
        expires_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn orders(questions: &[Question]) -> Vec<u32> {
    questions.iter().map(|q| q.order).collect()
}

pub fn prompts(questions: &[Question]) -> Vec<&str> {
    questions.iter().map(|q| q.question_text.as_str()).collect()
}
