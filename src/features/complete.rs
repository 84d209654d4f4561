//! Button clicks on bot messages.
//!
//! A task message moves from open to completed exactly once. The state is
//! the `callback_id` of the message itself: the completed edit sets it to
//! `disabled`, and any later click on that message is ignored.

use futures::future::join;
use tracing::{error, info, warn};

use super::tutorial::send_tutorial;
use crate::core::models::{CorrelationToken, InteractionPayload};
use crate::core::teams::TeamRegistry;
use crate::errors::SlackError;
use crate::slack::attachments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Already completed, or the payload carried nothing actionable.
    Ignored,
    /// The button was a "view tutorial" trigger.
    TutorialSent,
    /// Completion notice attempted, plus the message edit when the task
    /// message was echoed back.
    Completed,
}

/// Route a button click by its correlation token.
///
/// # Errors
///
/// Returns `SlackError::UnknownTeam` for an unconfigured team and propagates
/// tutorial delivery failures. Failures of the two completion side effects
/// are logged, not returned.
pub async fn handle_interaction(
    teams: &TeamRegistry,
    payload: &InteractionPayload,
) -> Result<InteractionOutcome, SlackError> {
    let Some(token) = payload.correlation_token() else {
        info!(callback_id = %payload.callback_id, "Interaction has no actionable token");
        return Ok(InteractionOutcome::Ignored);
    };

    match token {
        CorrelationToken::Disabled => Ok(InteractionOutcome::Ignored),
        CorrelationToken::Intro | CorrelationToken::Error => {
            let team = teams.require(&payload.team.id)?;
            send_tutorial(team, &payload.user.id).await?;
            Ok(InteractionOutcome::TutorialSent)
        }
        CorrelationToken::OriginChannel(origin_channel_id) => {
            complete_task(teams, payload, &origin_channel_id).await
        }
    }
}

async fn complete_task(
    teams: &TeamRegistry,
    payload: &InteractionPayload,
    origin_channel_id: &str,
) -> Result<InteractionOutcome, SlackError> {
    let team = teams.require(&payload.team.id)?;

    let echoed = payload
        .original_message
        .as_ref()
        .and_then(|original| original.attachments.first().map(|task| (original, task)));

    let (announced, edited) = match echoed {
        Some((original, open_task)) => {
            let notice =
                attachments::completion_notice(&payload.user.id, open_task.task_description());
            let completed = attachments::completed_task(open_task);
            let (announced, edited) = join(
                team.client.post_message(origin_channel_id, &[notice]),
                team.client
                    .update_message(&payload.channel.id, &original.ts, &[completed]),
            )
            .await;
            (announced, Some(edited))
        }
        None => {
            warn!("Completion click without the task message; skipping the edit");
            let notice = attachments::completion_notice(&payload.user.id, None);
            (team.client.post_message(origin_channel_id, &[notice]).await, None)
        }
    };

    if let Err(e) = announced {
        error!(channel_id = %origin_channel_id, "Failed to announce completion: {}", e);
    }
    if let Some(Err(e)) = edited {
        error!(channel_id = %payload.channel.id, "Failed to mark task completed: {}", e);
    }

    info!(
        user_id = %payload.user.id,
        origin_channel_id = %origin_channel_id,
        "Task completed"
    );
    Ok(InteractionOutcome::Completed)
}
