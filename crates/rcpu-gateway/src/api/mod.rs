//! HTTP surface: suffix dispatch and response helpers.
//!
//! The original dashboard server routed on "path ends with", so `/cpu.api`
//! and `/anything/cpu.api` hit the same handler. Unmatched paths answer 404
//! with its "no such file" message; static assets are served elsewhere.

pub mod cpu;
pub mod form;
pub mod temp;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;

pub async fn dispatch(State(app): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();

    let (route, response) = if path.ends_with("cpu.api") {
        ("cpu.api", cpu::handle(&app, req).await)
    } else if path.ends_with("temp.api") {
        ("temp.api", temp::handle(&app).await)
    } else if path == "/metrics" {
        ("metrics", metrics_response(&app))
    } else {
        ("other", not_found("no such file"))
    };

    app.metrics().http_requests.inc(&[
        ("route", route),
        ("status", response.status().as_str()),
    ]);

    response
}

fn metrics_response(app: &AppState) -> Response {
    let body = app
        .metrics()
        .render(&[("rcpu_snapshot_cores", app.core_count() as u64)]);
    ok_with("text/plain; version=0.0.4", body)
}

pub(crate) fn ok_with(content_type: &'static str, body: String) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

pub(crate) fn forbidden(msg: &'static str) -> Response {
    (StatusCode::FORBIDDEN, msg).into_response()
}

pub(crate) fn not_found(msg: &'static str) -> Response {
    (StatusCode::NOT_FOUND, msg).into_response()
}
