pub mod answer;
pub mod appointment;
pub mod document;
pub mod patient;
pub mod profile;
pub mod public_link;
pub mod question;
pub mod question_bank;
pub mod questionnaire;
pub mod response;
