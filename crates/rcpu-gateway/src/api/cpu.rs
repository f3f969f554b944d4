//! `cpu.api` — the per-core utilization endpoint.

use axum::extract::Request;
use axum::http::Method;
use axum::response::Response;

use crate::api::{self, form};
use crate::app_state::AppState;

// The form is a single short field; anything bigger is not ours.
const MAX_FORM_BYTES: usize = 4096;

/// GET carries the form in the query string, POST in the body. A valid
/// request gets the latest snapshot as a JSON array of integers, one per
/// discovered CPU row; anything off-contract gets 403.
pub async fn handle(app: &AppState, req: Request) -> Response {
    let raw = if req.method() == Method::GET {
        req.uri().query().unwrap_or("").to_string()
    } else {
        match axum::body::to_bytes(req.into_body(), MAX_FORM_BYTES).await {
            Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(s) => s,
                Err(_) => return api::forbidden("Bad request"),
            },
            Err(_) => return api::forbidden("Bad request"),
        }
    };

    let Some(counter) = form::single_counter(&raw) else {
        return api::forbidden("Bad request");
    };
    // The counter is the dashboard's poll sequence number; validated but
    // otherwise unused, as in the original server.
    tracing::debug!(counter, "cpu.api hit");

    let snapshot = app.latest_snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(body) => api::ok_with("application/json", body),
        Err(_) => api::forbidden("Bad request"),
    }
}
