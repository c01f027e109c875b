pub mod appointments;
pub mod auth;
pub mod documents;
pub mod health;
pub mod patients;
pub mod profile;
pub mod public_links;
pub mod question_bank;
pub mod question_types;
pub mod questionnaires;
pub mod responses;

/// Trim optional text, treating blank as absent.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
