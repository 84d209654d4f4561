//! Handler for Slack Events API callbacks (`POST /events`).
//!
//! This module processes:
//! - `url_verification` - the endpoint handshake
//! - `event_callback` / `message` - a user messaged the bot

use serde_json::Value;
use tracing::{debug, info, warn};

use super::helpers::{err_response, ok_empty, ok_text};
use super::parsing::v_str;
use super::state::AppState;
use super::verification::verify_token;
use crate::core::models::RawMessage;
use crate::core::teams::Team;
use crate::features::{dispatch, parse};

/// Handle a JSON body posted to `/events`.
///
/// Every verified request is acknowledged with 200 whatever happens
/// downstream, so Slack does not start redelivering.
pub async fn handle_events(state: &AppState, body: &str) -> Value {
    let Ok(json_body) = serde_json::from_str::<Value>(body) else {
        warn!("Events body is not JSON");
        return err_response(400, "Invalid JSON body");
    };

    let token = v_str(&json_body, &["token"]);
    if !verify_token(&state.config, token) {
        return err_response(
            403,
            &format!(
                "Invalid Slack verification token received: {}",
                token.unwrap_or("")
            ),
        );
    }

    match v_str(&json_body, &["type"]).unwrap_or("") {
        "url_verification" => ok_text(v_str(&json_body, &["challenge"]).unwrap_or("")),
        "event_callback" => handle_event_callback(state, &json_body).await,
        other => {
            warn!(body_type = %other, "Unexpected events payload type");
            ok_empty()
        }
    }
}

/// Handle an `event_callback` payload.
pub async fn handle_event_callback(state: &AppState, json_body: &Value) -> Value {
    let team_id = v_str(json_body, &["team_id"]).unwrap_or("");
    let Some(event) = json_body.get("event") else {
        warn!(team_id = %team_id, "event_callback without event");
        return ok_empty();
    };

    let event_type = v_str(event, &["type"]).unwrap_or("");
    info!(event_type = %event_type, team_id = %team_id, "Processing event callback");

    match event_type {
        "message" => match state.teams.get(team_id) {
            Some(team) => handle_message_event(team, event).await,
            None => warn!(team_id = %team_id, "Message event for unconfigured team"),
        },
        _ => {
            info!(event_type = %event_type, event = %event, "Unexpected event");
        }
    }

    ok_empty()
}

/// Extract the message a user typed. Edits, joins, bot posts and other
/// subtyped messages yield `None`.
#[must_use]
pub fn message_from_event(event: &Value) -> Option<RawMessage> {
    if event.get("bot_id").is_some() || event.get("subtype").is_some() {
        return None;
    }

    let sender_id = v_str(event, &["user"]).filter(|u| !u.is_empty())?;
    let channel_id = v_str(event, &["channel"]).unwrap_or("");
    // IM channel ids start with `D`; older payloads omit `channel_type`.
    let is_direct = match v_str(event, &["channel_type"]) {
        Some(channel_type) => channel_type == "im",
        None => channel_id.starts_with('D'),
    };
    Some(RawMessage {
        text: v_str(event, &["text"]).unwrap_or("").to_string(),
        sender_id: sender_id.to_string(),
        channel_id: channel_id.to_string(),
        is_direct,
    })
}

/// Parse a message event and dispatch its commands.
///
/// Messages sent by the team's own bot user are dropped before parsing so
/// the bot never answers itself. Commands are accepted from any channel, but
/// ordinary chat only earns the intro when it was sent to the bot directly.
pub async fn handle_message_event(team: &Team, event: &Value) {
    let Some(message) = message_from_event(event) else {
        debug!("Ignoring non-user message event");
        return;
    };

    if message.sender_id == team.bot_user_id {
        debug!("Ignoring message from our own bot user");
        return;
    }

    #[cfg(feature = "debug-logs")]
    debug!(text = %message.text, "Message text");

    let parsed = parse(&message.text);
    info!(
        user_id = %message.sender_id,
        channel_id = %message.channel_id,
        commands = parsed.as_ref().map_or(0, Vec::len),
        is_command = parsed.is_ok(),
        "Parsed message"
    );

    if parsed.is_err() && !message.is_direct {
        debug!(channel_id = %message.channel_id, "Ignoring channel chatter");
        return;
    }

    dispatch(team, &message.sender_id, &message.channel_id, &parsed).await;
}
