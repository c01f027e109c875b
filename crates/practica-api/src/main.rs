use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use practica_api::config::{ApiConfig, StorageBackend, TokenMode};
use practica_api::state::{AppState, CognitoSignIn};
use practica_auth::jwt::TokenVerifier;
use practica_storage::{MemoryStore, ObjectStore, S3Store};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let store: Arc<dyn ObjectStore> = match config.storage {
        StorageBackend::S3 => {
            let client =
                practica_storage::client::build_client_with_region(&config.region).await;
            Arc::new(S3Store::new(client, &config.bucket))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let verifier = match &config.token {
        TokenMode::Cognito { public_key_pem } => TokenVerifier::cognito_from_pem(
            public_key_pem.as_bytes(),
            config.cognito_user_pool_id.as_deref().unwrap_or_default(),
            &config.region,
        )?,
        TokenMode::SharedSecret { secret, issuer } => {
            tracing::warn!(issuer = %issuer, "accepting HS256 tokens signed with a shared secret");
            TokenVerifier::shared_secret(secret.as_bytes(), issuer)
        }
    };

    let mut state = AppState::new(store, Arc::new(verifier)).with_link_ttl_hours(config.link_ttl_hours);

    if let Some(client_id) = &config.cognito_client_id {
        let client = practica_auth::client::build_client_with_region(&config.region).await;
        state = state.with_cognito(CognitoSignIn {
            client,
            client_id: client_id.clone(),
        });
    }

    let app = practica_api::app(state);

    match &config.listen_addr {
        Some(addr) => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(addr = %addr, "serving HTTP");
            axum::serve(listener, app).await?;
            Ok(())
        }
        None => lambda_http::run(app).await.map_err(|e| eyre::eyre!(e)),
    }
}
