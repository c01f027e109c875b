mod common;

use common::*;
use practica_core::models::answer::{Answer, UploadedFile};
use practica_forms::validation::{REQUIRED_MESSAGE, validate_answers, validate_definition};
use uuid::Uuid;

fn file(name: &str, content_type: &str) -> UploadedFile {
    UploadedFile {
        filename: name.to_string(),
        content_type: content_type.to_string(),
        size_bytes: 1024,
        storage_key: None,
    }
}

#[test]
fn complete_valid_answers_pass() {
    let q = questionnaire(vec![
        text("Name", true),
        single_choice("Smoking", true),
        multiple_choice("Symptoms"),
        scale("Pain"),
        slider("Temperature"),
        date("Onset"),
        file_upload("Scans"),
        yes_no("Allergies", true),
        body_complaint("Where"),
        head_complaint("Head"),
    ]);
    let ids: Vec<Uuid> = q.questions.iter().map(|q| q.id).collect();

    let answers = vec![
        Answer::Text { question_id: ids[0], value: "Ada".into() },
        Answer::SingleChoice { question_id: ids[1], selected_option: Some("never".into()) },
        Answer::MultipleChoice { question_id: ids[2], selected_options: vec!["fever".into(), "cough".into()] },
        Answer::Scale { question_id: ids[3], value: Some(7) },
        Answer::Slider { question_id: ids[4], value: Some(37.5) },
        Answer::Date { question_id: ids[5], value: Some(jiff::civil::date(2024, 3, 1)) },
        Answer::FileUpload { question_id: ids[6], files: vec![file("xray.PNG", "image/png"), file("report.pdf", "application/octet-stream")] },
        Answer::YesNo { question_id: ids[7], value: Some(false) },
        Answer::BodyComplaint { question_id: ids[8], selected_options: vec!["lower_back".into()] },
        Answer::HeadComplaint { question_id: ids[9], selected_options: vec!["jaw".into()] },
    ];

    assert_eq!(validate_answers(&q, &answers), Ok(()));
}

#[test]
fn missing_required_answers_are_reported_per_question() {
    let q = questionnaire(vec![text("Name", true), yes_no("Allergies", true), text("Notes", false)]);

    let errors = validate_answers(&q, &[]).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(&q.questions[0].id.to_string()), Some(REQUIRED_MESSAGE));
    assert_eq!(errors.get(&q.questions[1].id.to_string()), Some(REQUIRED_MESSAGE));
}

#[test]
fn blank_answer_to_required_question_counts_as_missing() {
    let q = questionnaire(vec![text("Name", true), single_choice("Smoking", true)]);
    let answers = vec![
        Answer::Text { question_id: q.questions[0].id, value: "  ".into() },
        Answer::SingleChoice { question_id: q.questions[1].id, selected_option: None },
    ];

    let errors = validate_answers(&q, &answers).unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn blank_answer_to_optional_question_is_fine() {
    let q = questionnaire(vec![multiple_choice("Symptoms")]);
    let answers = vec![Answer::MultipleChoice { question_id: q.questions[0].id, selected_options: vec![] }];
    assert!(validate_answers(&q, &answers).is_ok());
}

#[test]
fn type_mismatch_is_reported() {
    let q = questionnaire(vec![yes_no("Allergies", false)]);
    let answers = vec![Answer::Text { question_id: q.questions[0].id, value: "yes".into() }];

    let errors = validate_answers(&q, &answers).unwrap_err();
    let message = errors.get(&q.questions[0].id.to_string()).unwrap();
    assert!(message.contains("yes_no"), "{message}");
}

#[test]
fn unknown_and_duplicate_answers_are_reported() {
    let q = questionnaire(vec![text("Name", false)]);
    let stray = Uuid::new_v4();
    let answers = vec![
        Answer::Text { question_id: q.questions[0].id, value: "a".into() },
        Answer::Text { question_id: q.questions[0].id, value: "b".into() },
        Answer::Text { question_id: stray, value: "c".into() },
    ];

    let errors = validate_answers(&q, &answers).unwrap_err();
    assert!(errors.get(&q.questions[0].id.to_string()).unwrap().contains("more than once"));
    assert!(errors.get(&stray.to_string()).is_some());
}

#[test]
fn choice_answers_must_use_declared_options() {
    let q = questionnaire(vec![single_choice("Smoking", false), multiple_choice("Symptoms")]);
    let answers = vec![
        Answer::SingleChoice { question_id: q.questions[0].id, selected_option: Some("weekly".into()) },
        Answer::MultipleChoice { question_id: q.questions[1].id, selected_options: vec!["fever".into(), "rash".into()] },
    ];

    let errors = validate_answers(&q, &answers).unwrap_err();
    assert!(errors.get(&q.questions[0].id.to_string()).unwrap().contains("weekly"));
    assert!(errors.get(&q.questions[1].id.to_string()).unwrap().contains("rash"));
}

#[test]
fn multiple_choice_respects_selection_bounds() {
    let q = questionnaire(vec![multiple_choice("Symptoms")]);
    let too_many = vec![Answer::MultipleChoice {
        question_id: q.questions[0].id,
        selected_options: vec!["fever".into(), "cough".into(), "fatigue".into()],
    }];
    assert!(validate_answers(&q, &too_many).is_err());

    let repeated = vec![Answer::MultipleChoice {
        question_id: q.questions[0].id,
        selected_options: vec!["fever".into(), "fever".into()],
    }];
    assert!(validate_answers(&q, &repeated).is_err());
}

#[test]
fn numeric_answers_are_range_and_step_checked() {
    let q = questionnaire(vec![scale("Pain"), slider("Temperature")]);
    let (pain, temp) = (q.questions[0].id, q.questions[1].id);

    let out_of_range = vec![
        Answer::Scale { question_id: pain, value: Some(11) },
        Answer::Slider { question_id: temp, value: Some(43.0) },
    ];
    let errors = validate_answers(&q, &out_of_range).unwrap_err();
    assert_eq!(errors.len(), 2);

    let off_step = vec![
        Answer::Scale { question_id: pain, value: Some(0) },
        Answer::Slider { question_id: temp, value: Some(36.3) },
    ];
    let errors = validate_answers(&q, &off_step).unwrap_err();
    assert!(errors.get(&temp.to_string()).unwrap().contains("multiple of"));
    assert!(errors.get(&pain.to_string()).is_none());
}

#[test]
fn date_answers_respect_bounds() {
    let q = questionnaire(vec![date("Onset")]);
    let answers = vec![Answer::Date { question_id: q.questions[0].id, value: Some(jiff::civil::date(1999, 12, 31)) }];
    let errors = validate_answers(&q, &answers).unwrap_err();
    assert!(errors.get(&q.questions[0].id.to_string()).unwrap().contains("on or after"));
}

#[test]
fn file_answers_respect_type_and_count() {
    let q = questionnaire(vec![file_upload("Scans")]);
    let id = q.questions[0].id;

    let wrong_type = vec![Answer::FileUpload { question_id: id, files: vec![file("notes.docx", "application/msword")] }];
    assert!(validate_answers(&q, &wrong_type).is_err());

    let too_many = vec![Answer::FileUpload {
        question_id: id,
        files: vec![file("a.png", "image/png"), file("b.png", "image/png"), file("c.png", "image/png")],
    }];
    assert!(validate_answers(&q, &too_many).is_err());
}

#[test]
fn complaint_answers_must_use_declared_regions() {
    let q = questionnaire(vec![body_complaint("Where"), head_complaint("Head")]);
    let answers = vec![
        Answer::BodyComplaint { question_id: q.questions[0].id, selected_options: vec!["jaw".into()] },
        Answer::HeadComplaint { question_id: q.questions[1].id, selected_options: vec!["jaw".into()] },
    ];

    let errors = validate_answers(&q, &answers).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.get(&q.questions[0].id.to_string()).is_some());
}

#[test]
fn text_answers_respect_max_length() {
    let q = questionnaire(vec![text("Name", false)]);
    let answers = vec![Answer::Text { question_id: q.questions[0].id, value: "x".repeat(21) }];
    assert!(validate_answers(&q, &answers).is_err());
}

#[test]
fn valid_definition_passes() {
    let q = questionnaire(vec![
        text("Name", true),
        single_choice("Smoking", true),
        multiple_choice("Symptoms"),
        scale("Pain"),
        slider("Temperature"),
        date("Onset"),
        file_upload("Scans"),
        yes_no("Allergies", true),
        body_complaint("Where"),
        head_complaint("Head"),
    ]);
    assert_eq!(validate_definition(&q), Ok(()));
}

#[test]
fn definition_problems_are_keyed_by_question() {
    use practica_core::models::question::{ChoiceOption, Question, QuestionKind};

    let mut q = questionnaire(vec![
        Question::new("", false, QuestionKind::YesNo {}),
        Question::new(
            "Pick",
            false,
            QuestionKind::SingleChoice {
                options: vec![ChoiceOption::new("a", "A"), ChoiceOption::new("a", "Also A")],
            },
        ),
        Question::new("Range", false, QuestionKind::Scale { min: 5, max: 5, labels: Default::default() }),
        Question::new("Slide", false, QuestionKind::Slider { min: 0.0, max: 1.0, step: 0.0, unit: None }),
        Question::new("Files", false, QuestionKind::FileUpload { accepted_file_types: vec![], max_files: 0 }),
        Question::new("Body", false, QuestionKind::BodyComplaint { regions: vec![] }),
    ]);
    q.title = "   ".to_string();

    let errors = validate_definition(&q).unwrap_err();

    assert!(errors.get("title").is_some());
    for question in &q.questions {
        assert!(
            errors.get(&question.id.to_string()).is_some(),
            "expected an error for {}",
            question.question_text
        );
    }
}

#[test]
fn standalone_question_problems_use_question_key() {
    use practica_core::models::question::{Question, QuestionKind};
    use practica_forms::validation::validate_question;

    assert!(validate_question(&yes_no("Any allergies?", false)).is_ok());

    let bad = Question::new(" ", false, QuestionKind::Slider { min: 0.0, max: 1.0, step: 0.0, unit: None });
    let errors = validate_question(&bad).unwrap_err();
    assert_eq!(errors.len(), 1);
    let message = errors.get("question").unwrap();
    assert!(message.contains("question text is required"));
    assert!(message.contains("; "));
}

#[test]
fn selection_bounds_cannot_exceed_option_count() {
    use practica_core::models::question::QuestionKind;
    use practica_forms::validation::validate_question;

    let mut question = multiple_choice("Symptoms");
    if let QuestionKind::MultipleChoice { min_selections, max_selections, .. } = &mut question.kind {
        *min_selections = Some(4);
        *max_selections = None;
    }

    let errors = validate_question(&question).unwrap_err();
    let message = errors.get("question").unwrap();
    assert!(message.contains("min_selections (4) exceeds the number of options (3)"), "{message}");

    if let QuestionKind::MultipleChoice { min_selections, .. } = &mut question.kind {
        *min_selections = Some(3);
    }
    assert!(validate_question(&question).is_ok());
}
