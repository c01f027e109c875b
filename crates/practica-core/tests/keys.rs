use practica_core::keys;
use uuid::Uuid;

#[test]
fn doctor_records_are_scoped_under_doctor_prefix() {
    let id = Uuid::new_v4();
    let prefix = keys::doctor_prefix("doc-1");

    for key in [
        keys::patient("doc-1", id),
        keys::questionnaire("doc-1", id),
        keys::response("doc-1", id),
        keys::document("doc-1", id),
        keys::bank_question("doc-1", id),
        keys::appointment("doc-1", id),
        keys::link_pointer("doc-1", "abc"),
    ] {
        assert!(key.starts_with(&prefix), "{key} not under {prefix}");
        assert!(key.ends_with(".json"));
    }
}

#[test]
fn record_keys_sit_under_their_list_prefix() {
    let id = Uuid::new_v4();
    assert!(keys::patient("d", id).starts_with(&keys::patients_prefix("d")));
    assert!(keys::questionnaire("d", id).starts_with(&keys::questionnaires_prefix("d")));
    assert!(keys::response("d", id).starts_with(&keys::responses_prefix("d")));
    assert!(keys::document("d", id).starts_with(&keys::documents_prefix("d")));
    assert!(keys::bank_question("d", id).starts_with(&keys::question_bank_prefix("d")));
    assert!(keys::appointment("d", id).starts_with(&keys::appointments_prefix("d")));
}

#[test]
fn document_file_lives_under_patient_files_prefix() {
    let patient = Uuid::new_v4();
    let doc = Uuid::new_v4();
    let key = keys::document_file("d", patient, doc, "scan.pdf");
    assert!(key.starts_with(&keys::patient_files_prefix("d", patient)));
    assert!(key.ends_with(&format!("{doc}/scan.pdf")));
}

#[test]
fn sanitize_filename_strips_directories() {
    assert_eq!(keys::sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(keys::sanitize_filename("C:\\Users\\me\\x-ray.png"), "x-ray.png");
}

#[test]
fn sanitize_filename_replaces_unsafe_characters() {
    assert_eq!(keys::sanitize_filename("lab results (1).pdf"), "lab_results__1_.pdf");
}

#[test]
fn sanitize_filename_never_returns_empty_or_dots() {
    assert_eq!(keys::sanitize_filename(""), "file");
    assert_eq!(keys::sanitize_filename(".."), "file");
    assert_eq!(keys::sanitize_filename("dir/"), "file");
}
