//! Axum router wiring.
//!
//! All paths funnel through one fallback handler that dispatches on the
//! path suffix, mirroring the original dashboard server's routing.

use axum::Router;

use crate::{api, app_state::AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(api::dispatch).with_state(state)
}
