//! practica-api
//!
//! REST API for the practice: patients, questionnaires, responses,
//! documents, the question bank, public links, and appointments.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the full router. Everything outside the public group requires a
/// verified bearer token.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/mfa", post(routes::auth::mfa))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route("/public/{token}", get(routes::public_links::open_link))
        .route(
            "/public/{token}/responses",
            post(routes::public_links::submit_response),
        )
        .route(
            "/question-types",
            get(routes::question_types::list_question_types),
        )
        .route(
            "/question-types/{tag}",
            get(routes::question_types::get_question_type),
        );

    let protected = Router::new()
        .route("/me", get(routes::profile::me))
        .route("/me/profile", put(routes::profile::update_profile))
        // Patients
        .route(
            "/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/patients/{id}",
            get(routes::patients::get_patient)
                .put(routes::patients::update_patient)
                .delete(routes::patients::delete_patient),
        )
        .route(
            "/patients/{id}/documents",
            get(routes::patients::list_patient_documents)
                .post(routes::documents::create_document),
        )
        .route(
            "/patients/{id}/responses",
            get(routes::patients::list_patient_responses),
        )
        .route(
            "/patients/{id}/appointments",
            get(routes::patients::list_patient_appointments),
        )
        // Questionnaires
        .route(
            "/questionnaires",
            get(routes::questionnaires::list_questionnaires)
                .post(routes::questionnaires::create_questionnaire),
        )
        .route(
            "/questionnaires/{id}",
            get(routes::questionnaires::get_questionnaire)
                .put(routes::questionnaires::update_questionnaire)
                .delete(routes::questionnaires::delete_questionnaire),
        )
        .route(
            "/questionnaires/{id}/duplicate",
            post(routes::questionnaires::duplicate_questionnaire),
        )
        .route(
            "/questionnaires/{id}/preview",
            get(routes::questionnaires::preview_questionnaire),
        )
        .route(
            "/questionnaires/{id}/questions",
            post(routes::questionnaires::insert_question),
        )
        .route(
            "/questionnaires/{id}/questions/reorder",
            post(routes::questionnaires::reorder_question),
        )
        .route(
            "/questionnaires/{id}/questions/from-bank",
            post(routes::questionnaires::insert_from_bank),
        )
        .route(
            "/questionnaires/{id}/questions/{question_id}",
            put(routes::questionnaires::update_question)
                .delete(routes::questionnaires::delete_question),
        )
        .route(
            "/questionnaires/{id}/questions/{question_id}/duplicate",
            post(routes::questionnaires::duplicate_question),
        )
        .route(
            "/questionnaires/{id}/links",
            get(routes::public_links::list_links).post(routes::public_links::create_link),
        )
        // Responses
        .route(
            "/responses",
            get(routes::responses::list_responses).post(routes::responses::create_response),
        )
        .route("/responses/{id}", get(routes::responses::get_response))
        .route(
            "/responses/{id}/preview",
            get(routes::responses::preview_response),
        )
        .route(
            "/responses/{id}/export",
            post(routes::responses::export_response),
        )
        // Documents
        .route(
            "/documents/{id}",
            get(routes::documents::get_document).delete(routes::documents::delete_document),
        )
        .route(
            "/documents/{id}/content",
            put(routes::documents::upload_content),
        )
        // Question bank
        .route(
            "/question-bank",
            get(routes::question_bank::list_bank_questions)
                .post(routes::question_bank::create_bank_question),
        )
        .route(
            "/question-bank/{id}",
            get(routes::question_bank::get_bank_question)
                .put(routes::question_bank::update_bank_question)
                .delete(routes::question_bank::delete_bank_question),
        )
        // Appointments
        .route(
            "/appointments",
            get(routes::appointments::list_appointments)
                .post(routes::appointments::create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(routes::appointments::get_appointment)
                .put(routes::appointments::update_appointment)
                .delete(routes::appointments::delete_appointment),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
