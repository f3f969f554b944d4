//! `temp.api` — the CPU temperature endpoint.

use axum::response::Response;

use crate::api;
use crate::app_state::AppState;

/// Fixed-width reading like `43.851 C`, or the literal `unknown` when this
/// host has no temperature source.
pub async fn handle(app: &AppState) -> Response {
    let body = match app.thermal().read_celsius().await {
        Some(celsius) => format!("{celsius:6.3} C"),
        None => "unknown".to_string(),
    };
    api::ok_with("text/plain", body)
}
