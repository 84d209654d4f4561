//! Handler for explicit tutorial requests (`POST /tutorial`).

use serde_json::Value;
use tracing::{error, warn};

use super::helpers::ok_empty;
use super::parsing::parse_form;
use super::state::AppState;
use crate::features::send_tutorial;

/// Handle a form body with `team_id` and `user_id`.
///
/// The form carries no verification token, so none is checked. Every request
/// is answered with 200; problems are only logged.
pub async fn handle_tutorial_request(state: &AppState, body: &str) -> Value {
    let form = match parse_form(body) {
        Ok(f) => f,
        Err(e) => {
            error!("Tutorial form parse error: {}", e);
            return ok_empty();
        }
    };

    let team_id = form.get("team_id").map_or("", String::as_str);
    let user_id = form.get("user_id").map_or("", String::as_str);
    if user_id.is_empty() {
        warn!(team_id = %team_id, "Tutorial request without user_id");
        return ok_empty();
    }

    let result = match state.teams.require(team_id) {
        Ok(team) => send_tutorial(team, user_id).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!(team_id = %team_id, user_id = %user_id, "Failed to send tutorial: {}", e);
    }

    ok_empty()
}
