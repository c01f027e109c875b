use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs every API request as a structured event. Query strings are left
/// out since search terms can contain patient names, and public link tokens
/// are masked.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = redact_path(req.uri().path());
    let started = std::time::Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}

fn redact_path(path: &str) -> String {
    match path.strip_prefix("/public/") {
        Some(rest) => match rest.split_once('/') {
            Some((_, tail)) => format!("/public/***/{tail}"),
            None => "/public/***".to_string(),
        },
        None => path.to_string(),
    }
}
