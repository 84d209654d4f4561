//! Handler for interactive message button clicks (`POST /actions`).

use serde_json::Value;
use tracing::{error, info};

use super::helpers::{err_response, ok_empty};
use super::parsing::parse_interactive_payload;
use super::state::AppState;
use super::verification::verify_token;
use crate::features::handle_interaction;

/// Handle a form body carrying a `payload=` JSON field.
///
/// Answers 403 when the payload token does not verify and 200 otherwise,
/// including for an undecodable payload and when completing the task or
/// sending the tutorial failed. Slack only reads the status to stop
/// redelivering, so decode failures are logged rather than returned.
pub async fn handle_actions(state: &AppState, body: &str) -> Value {
    let payload = match parse_interactive_payload(body) {
        Ok(p) => p,
        Err(e) => {
            error!("Interactive payload parse error: {}", e);
            return ok_empty();
        }
    };

    if !verify_token(&state.config, Some(payload.token.as_str())) {
        return err_response(403, "Invalid Slack verification token");
    }

    match handle_interaction(&state.teams, &payload).await {
        Ok(outcome) => info!(
            callback_id = %payload.callback_id,
            team_id = %payload.team.id,
            ?outcome,
            "Handled interaction"
        ),
        Err(e) => error!(
            callback_id = %payload.callback_id,
            team_id = %payload.team.id,
            "Interaction failed: {}", e
        ),
    }

    ok_empty()
}
