//! Questionnaire duplication.

use practica_core::models::questionnaire::Questionnaire;
use uuid::Uuid;

use crate::builder::renumber;

const COPY_MARKER: &str = " (Copy";

/// Split `"Intake (Copy 3)"` into `("Intake", Some(3))`. A bare `(Copy)`
/// counts as copy 1.
fn split_copy_suffix(title: &str) -> (&str, Option<u32>) {
    let Some(inner) = title.strip_suffix(')') else {
        return (title, None);
    };
    let Some((base, rest)) = inner.rsplit_once(COPY_MARKER) else {
        return (title, None);
    };

    if rest.is_empty() {
        return (base, Some(1));
    }
    match rest.strip_prefix(' ').and_then(|n| n.parse::<u32>().ok()) {
        Some(n) => (base, Some(n)),
        None => (title, None),
    }
}

/// Title for a new copy of `title`, one past the highest copy counter
/// already used for the same base title.
pub fn next_copy_title<'a>(title: &str, existing_titles: impl IntoIterator<Item = &'a str>) -> String {
    let (base, _) = split_copy_suffix(title.trim());

    let highest = existing_titles
        .into_iter()
        .filter_map(|t| match split_copy_suffix(t.trim()) {
            (b, Some(n)) if b == base => Some(n),
            _ => None,
        })
        .max()
        .unwrap_or(0);

    format!("{base}{COPY_MARKER} {})", highest.saturating_add(1))
}

/// Deep-copy a questionnaire: new id, fresh question ids, dense order,
/// active, no expiry.
pub fn duplicate_questionnaire<'a>(
    source: &Questionnaire,
    existing_titles: impl IntoIterator<Item = &'a str>,
    now: jiff::Timestamp,
) -> Questionnaire {
    let mut questions = source.questions.clone();
    questions.sort_by_key(|q| q.order);
    for question in &mut questions {
        question.id = Uuid::new_v4();
    }
    renumber(&mut questions);

    Questionnaire {
        id: Uuid::new_v4(),
        doctor_id: source.doctor_id.clone(),
        title: next_copy_title(&source.title, existing_titles),
        description: source.description.clone(),
        category: source.category.clone(),
        specialty: source.specialty.clone(),
        questions,
        is_active: true,
        expires_at: None,
        created_at: now,
        updated_at: now,
    }
}
