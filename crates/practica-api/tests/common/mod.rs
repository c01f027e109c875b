#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use jsonwebtoken::{EncodingKey, Header, encode};
use practica_api::app;
use practica_api::state::AppState;
use practica_auth::jwt::TokenVerifier;
use practica_storage::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret";
pub const ISSUER: &str = "https://practica.test";
pub const DOCTOR: &str = "doctor-a";
pub const OTHER_DOCTOR: &str = "doctor-b";

pub fn token_for(sub: &str) -> String {
    let now = jiff::Timestamp::now().as_second();
    let claims = json!({
        "sub": sub,
        "iss": ISSUER,
        "token_use": "access",
        "exp": now + 3600,
        "iat": now,
        "email": format!("{sub}@example.com"),
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let verifier = Arc::new(TokenVerifier::shared_secret(SECRET, ISSUER));
        let state = AppState::new(store.clone(), verifier);
        Self {
            router: app(state),
            store,
            token: token_for(DOCTOR),
        }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, Some(&self.token), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(&self.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(&self.token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, Some(&self.token), None).await
    }

    pub async fn create_patient(&self, first: &str, last: &str) -> String {
        let (status, body) = self
            .post("/patients", json!({ "first_name": first, "last_name": last }))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Questionnaire with a required single-choice and an optional yes/no.
    pub async fn create_questionnaire(&self, title: &str) -> Value {
        let (status, body) = self
            .post(
                "/questionnaires",
                json!({
                    "title": title,
                    "description": "Before your first visit",
                    "questions": [
                        {
                            "id": uuid::Uuid::new_v4(),
                            "question_text": "Do you smoke?",
                            "required": true,
                            "order": 0,
                            "question_type": "single_choice",
                            "options": [
                                { "value": "never", "label": "Never" },
                                { "value": "daily", "label": "Daily" }
                            ]
                        },
                        {
                            "id": uuid::Uuid::new_v4(),
                            "question_text": "Any allergies?",
                            "order": 1,
                            "question_type": "yes_no"
                        }
                    ]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

pub fn question_ids(questionnaire: &Value) -> Vec<String> {
    questionnaire["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}

/// Answers that satisfy [`TestApp::create_questionnaire`].
pub fn valid_answers(questionnaire: &Value) -> Value {
    let ids = question_ids(questionnaire);
    json!([
        { "question_type": "single_choice", "question_id": ids[0], "selected_option": "daily" },
        { "question_type": "yes_no", "question_id": ids[1], "value": false }
    ])
}
