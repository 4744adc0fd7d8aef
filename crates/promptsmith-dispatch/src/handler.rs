//! Axum routes for the dispatcher endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, post};
use axum::{Json, Router};
use bytes::Bytes;
use promptsmith_core::HttpError;

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;

/// Paths the dispatcher answers on
pub const DISPATCH_PATHS: [&str; 2] = ["/", "/api/proxy-api"];

/// Build the dispatcher router
///
/// `POST` dispatches, `OPTIONS` answers the preflight with an empty 200,
/// and every other method gets a JSON 405.
pub fn dispatch_router(dispatcher: Dispatcher) -> Router {
    let endpoint = || -> MethodRouter<Dispatcher> {
        post(handle_dispatch).options(preflight).fallback(method_not_allowed)
    };

    DISPATCH_PATHS
        .into_iter()
        .fold(Router::new(), |router, path| router.route(path, endpoint()))
        .with_state(dispatcher)
}

/// Handle `POST`
async fn handle_dispatch(State(dispatcher): State<Dispatcher>, body: Bytes) -> Response {
    match dispatcher.dispatch(&body).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Handle `OPTIONS`
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    error_response(&DispatchError::MethodNotAllowed)
}

/// Convert a dispatch error into its JSON response
pub fn error_response(error: &DispatchError) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!(error_type = error.error_type(), error = %error, "dispatch failed");
    } else {
        tracing::debug!(error_type = error.error_type(), error = %error, "dispatch rejected");
    }

    (status, Json(error.response_body())).into_response()
}
