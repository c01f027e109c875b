//! Object key conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the canonical
//! layout of objects in the Practica bucket. Every doctor-owned record lives
//! under `doctors/{doctor_id}/`; listing that prefix is the ownership filter.

use uuid::Uuid;

pub fn doctor_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/")
}

pub fn patients_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/patients/")
}

pub fn patient(doctor_id: &str, id: Uuid) -> String {
    format!("doctors/{doctor_id}/patients/{id}.json")
}

pub fn questionnaires_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/questionnaires/")
}

pub fn questionnaire(doctor_id: &str, id: Uuid) -> String {
    format!("doctors/{doctor_id}/questionnaires/{id}.json")
}

pub fn responses_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/responses/")
}

pub fn response(doctor_id: &str, id: Uuid) -> String {
    format!("doctors/{doctor_id}/responses/{id}.json")
}

pub fn documents_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/documents/")
}

pub fn document(doctor_id: &str, id: Uuid) -> String {
    format!("doctors/{doctor_id}/documents/{id}.json")
}

pub fn patient_files_prefix(doctor_id: &str, patient_id: Uuid) -> String {
    format!("doctors/{doctor_id}/files/{patient_id}/")
}

pub fn document_file(doctor_id: &str, patient_id: Uuid, document_id: Uuid, filename: &str) -> String {
    format!(
        "doctors/{doctor_id}/files/{patient_id}/{document_id}/{}",
        sanitize_filename(filename)
    )
}

pub fn question_bank_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/question-bank/")
}

pub fn bank_question(doctor_id: &str, id: Uuid) -> String {
    format!("doctors/{doctor_id}/question-bank/{id}.json")
}

pub fn appointments_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/appointments/")
}

pub fn appointment(doctor_id: &str, id: Uuid) -> String {
    format!("doctors/{doctor_id}/appointments/{id}.json")
}

pub fn links_prefix(doctor_id: &str) -> String {
    format!("doctors/{doctor_id}/links/")
}

/// Per-doctor pointer to a public link, so a doctor can list their links
/// without scanning the shared `public_links/` prefix.
pub fn link_pointer(doctor_id: &str, token: &str) -> String {
    format!("doctors/{doctor_id}/links/{token}.json")
}

pub fn public_link(token: &str) -> String {
    format!("public_links/{token}.json")
}

pub fn profile(doctor_id: &str) -> String {
    format!("profiles/{doctor_id}.json")
}

/// Reduce a client-supplied filename to a single safe path segment.
///
/// Keeps the final component only, replaces anything outside
/// `[A-Za-z0-9._-]` with `_`, and never returns an empty or dot-only name.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        "file".to_string()
    } else {
        cleaned
    }
}
