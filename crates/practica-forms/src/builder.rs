//! Builder operations on an ordered question list.
//!
//! Every operation leaves `order` dense (`0..n-1`) and equal to each
//! question's position in the vector.

use practica_core::models::question::Question;
use practica_core::models::question_bank::BankQuestion;
use uuid::Uuid;

use crate::error::FormError;

/// Rewrite `order` to match vector position.
pub fn renumber(questions: &mut [Question]) {
    for (i, question) in questions.iter_mut().enumerate() {
        question.order = i as u32;
    }
}

/// Sort by the incoming `order` (stable, so ties keep their array position)
/// and renumber. Used when a whole question array is saved at once.
pub fn normalize(questions: &mut [Question]) {
    questions.sort_by_key(|q| q.order);
    renumber(questions);
}

pub fn position_of(questions: &[Question], id: Uuid) -> Result<usize, FormError> {
    questions
        .iter()
        .position(|q| q.id == id)
        .ok_or(FormError::QuestionNotFound(id))
}

pub fn append(questions: &mut Vec<Question>, question: Question) -> Uuid {
    let len = questions.len();
    insert_at(questions, question, len)
}

/// Insert at `position`, clamped to the end of the list.
pub fn insert_at(questions: &mut Vec<Question>, question: Question, position: usize) -> Uuid {
    let id = question.id;
    let position = position.min(questions.len());
    questions.insert(position, question);
    renumber(questions);
    id
}

/// Move the question at `from` to `to` (drag end).
pub fn move_question(questions: &mut Vec<Question>, from: usize, to: usize) -> Result<(), FormError> {
    let len = questions.len();
    for index in [from, to] {
        if index >= len {
            return Err(FormError::IndexOutOfRange { index, len });
        }
    }

    let question = questions.remove(from);
    questions.insert(to, question);
    renumber(questions);
    Ok(())
}

/// Copy a question with a fresh id and place the copy right after it.
pub fn duplicate_question(questions: &mut Vec<Question>, id: Uuid) -> Result<Uuid, FormError> {
    let position = position_of(questions, id)?;
    let mut copy = questions[position].clone();
    copy.id = Uuid::new_v4();
    Ok(insert_at(questions, copy, position + 1))
}

pub fn remove_question(questions: &mut Vec<Question>, id: Uuid) -> Result<Question, FormError> {
    let position = position_of(questions, id)?;
    let removed = questions.remove(position);
    renumber(questions);
    Ok(removed)
}

/// Replace a question's definition in place, keeping its position.
pub fn replace_question(questions: &mut [Question], mut question: Question) -> Result<(), FormError> {
    let position = position_of(questions, question.id)?;
    question.order = position as u32;
    questions[position] = question;
    Ok(())
}

/// Insert a copy of a question bank entry. Appends when `position` is `None`.
pub fn insert_from_bank(
    questions: &mut Vec<Question>,
    entry: &BankQuestion,
    position: Option<usize>,
) -> Uuid {
    let mut question = entry.question.clone();
    question.id = Uuid::new_v4();
    let position = position.unwrap_or(questions.len());
    insert_at(questions, question, position)
}
