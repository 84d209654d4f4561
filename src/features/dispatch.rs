//! Sends the messages that follow from a parsed task command.

use tracing::{error, info};

use crate::core::models::{Command, NotACommand};
use crate::core::teams::Team;
use crate::slack::attachments;

/// What a single command turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A task notification to the mentioned user.
    Task,
    /// An empty-task error to the sender.
    EmptyTaskError,
}

/// Send one message per command, or the intro offer when the text was not a
/// command.
///
/// Sends are sequential and best-effort: a failed send is logged and the
/// remaining commands are still delivered.
pub async fn dispatch(
    team: &Team,
    sender_id: &str,
    origin_channel_id: &str,
    parsed: &Result<Vec<Command>, NotACommand>,
) {
    let commands = match parsed {
        Ok(commands) => commands,
        Err(NotACommand) => {
            send_intro(team, sender_id).await;
            return;
        }
    };

    for command in commands {
        let delivery = dispatch_command(team, sender_id, origin_channel_id, command).await;
        info!(
            target_user_id = %command.target_user_id,
            ?delivery,
            "Dispatched command"
        );
    }
}

async fn dispatch_command(
    team: &Team,
    sender_id: &str,
    origin_channel_id: &str,
    command: &Command,
) -> Delivery {
    if command.task_text.is_empty() {
        let notice = attachments::empty_task_error(&command.target_user_id);
        if let Err(e) = team.client.post_message(sender_id, &[notice]).await {
            error!(user_id = %sender_id, "Failed to send empty task error: {}", e);
        }
        return Delivery::EmptyTaskError;
    }

    let task = attachments::task_assignment(
        &command.target_user_id,
        sender_id,
        &command.task_text,
        origin_channel_id,
    );
    if let Err(e) = team
        .client
        .post_message(&command.target_user_id, &[task])
        .await
    {
        error!(
            target_user_id = %command.target_user_id,
            "Failed to send task: {}", e
        );
    }
    Delivery::Task
}

async fn send_intro(team: &Team, sender_id: &str) {
    if let Err(e) = team
        .client
        .post_message(sender_id, &[attachments::intro()])
        .await
    {
        error!(user_id = %sender_id, "Failed to send intro: {}", e);
    }
}
