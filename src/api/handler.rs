//! API Lambda handler - thin router that delegates to specialized handlers.
//!
//! This module handles:
//! - Request validation (path, body)
//! - Event callbacks (delegated to `event_handler`)
//! - Interactive components (delegated to `interactive_handler`)
//! - Tutorial requests (delegated to `tutorial_handler`)

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::state::AppState;
use super::{event_handler, helpers, interactive_handler, parsing, tutorial_handler};

/// The inbound surfaces Slack posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Events,
    Actions,
    Tutorial,
}

impl Endpoint {
    /// Match on the path suffix so stage prefixes (`/prod/events`) still route.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        if path.ends_with("/events") {
            Some(Self::Events)
        } else if path.ends_with("/actions") {
            Some(Self::Actions)
        } else if path.ends_with("/tutorial") {
            Some(Self::Tutorial)
        } else {
            None
        }
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails; malformed requests get a 4xx response payload instead.
#[tracing::instrument(level = "info", skip(state, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(state: &AppState, event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(route(state, &event.payload).await)
}

/// Route one HTTP request envelope to its handler.
///
/// `/actions` and `/tutorial` acknowledge every request that reaches them
/// with 200, including ones whose body cannot be decoded; only a token
/// mismatch on `/actions` is refused.
pub async fn route(state: &AppState, request: &Value) -> Value {
    let path = parsing::request_path(request);
    info!(raw_path = %path, "Request path");

    let Some(endpoint) = Endpoint::from_path(path) else {
        error!(raw_path = %path, "No route for path");
        return helpers::err_response(404, "Not found");
    };

    let body = match parsing::request_body(request) {
        Ok(b) => b,
        Err(e) if endpoint == Endpoint::Events => {
            error!("Invalid request body: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
        Err(e) => {
            error!(?endpoint, "Invalid request body: {}", e);
            return helpers::ok_empty();
        }
    };

    match endpoint {
        Endpoint::Events => event_handler::handle_events(state, &body).await,
        Endpoint::Actions => interactive_handler::handle_actions(state, &body).await,
        Endpoint::Tutorial => tutorial_handler::handle_tutorial_request(state, &body).await,
    }
}
