use std::sync::Arc;

use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use practica_auth::jwt::TokenVerifier;
use practica_export::styles::DocumentStyles;
use practica_storage::ObjectStore;

use crate::config::DEFAULT_LINK_TTL_HOURS;

/// Cognito app client used by the sign-in routes.
#[derive(Clone)]
pub struct CognitoSignIn {
    pub client: CognitoClient,
    pub client_id: String,
}

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub verifier: Arc<TokenVerifier>,
    /// `None` when sign-in is handled elsewhere (local runs, tests).
    pub cognito: Option<CognitoSignIn>,
    pub link_ttl_hours: u32,
    pub export_styles: DocumentStyles,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, verifier: Arc<TokenVerifier>) -> Self {
        Self {
            store,
            verifier,
            cognito: None,
            link_ttl_hours: DEFAULT_LINK_TTL_HOURS,
            export_styles: DocumentStyles::default(),
        }
    }

    pub fn with_cognito(mut self, sign_in: CognitoSignIn) -> Self {
        self.cognito = Some(sign_in);
        self
    }

    pub fn with_link_ttl_hours(mut self, hours: u32) -> Self {
        self.link_ttl_hours = hours;
        self
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }
}
