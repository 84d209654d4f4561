//! Legacy message attachments and the builders for every message the bot
//! sends.
//!
//! Task state lives in these attachments: the `callback_id` carries the
//! correlation token and the `fields` carry the task description and the
//! assigner, so a button click echoes everything needed to finish the task.

use serde::{Deserialize, Serialize};

use crate::core::models::CorrelationToken;

pub const ACCENT_COLOR: &str = "#3c0783";
pub const TASK_FIELD_TITLE: &str = "Task";
pub const ASSIGNER_FIELD_TITLE: &str = "Assigned by";

const ATTACHMENT_TYPE: &str = "default";
const BUTTON: &str = "button";

const TUTORIAL_TEXT: &str = "Welcome to DonutBot! DonutBot is a helper app for assigning tasks to other users.\n\nTo assign a task, simply send a direct message to DonutBot. In the body of the message, tag the user you'd like to assign the task to followed by the task description in plain text.\n\nYou can include as many tasks to as many users as you like, simply add another tag and task after the first.\nExample: '@Will Take out the trash. @Molly Do the dishes.'";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AttachmentAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub short: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentAction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl AttachmentAction {
    fn button(name: &str, value: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            text: text.to_string(),
            kind: BUTTON.to_string(),
        }
    }
}

impl Attachment {
    fn titled(title: &str, text: String, token: &str) -> Self {
        Self {
            color: Some(ACCENT_COLOR.to_string()),
            title: Some(title.to_string()),
            text: Some(text),
            callback_id: Some(token.to_string()),
            attachment_type: Some(ATTACHMENT_TYPE.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(&self, title: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.title == title)
            .map(|f| f.value.as_str())
    }

    /// The task description, read from the `Task` field. Messages without
    /// structured fields fall back to the attachment text.
    #[must_use]
    pub fn task_description(&self) -> Option<&str> {
        self.field(TASK_FIELD_TITLE).or(self.text.as_deref())
    }
}

fn complete_button() -> AttachmentAction {
    AttachmentAction::button("option", "completed", ":white_large_square: Complete?")
}

fn completed_button() -> AttachmentAction {
    AttachmentAction::button("option", "completed", ":white_check_mark: Completed")
}

fn tutorial_button() -> AttachmentAction {
    AttachmentAction::button("tutorial", "tutorial", "View Tutorial")
}

/// The notification an assignee receives for a new task.
#[must_use]
pub fn task_assignment(
    target_user_id: &str,
    assigner_id: &str,
    task_text: &str,
    origin_channel_id: &str,
) -> Attachment {
    let text = format!(
        "Hello <@{target_user_id}>,\n<@{assigner_id}> has requested the following:\n\n'{task_text}'\n\nClick below when task is complete."
    );
    let token = CorrelationToken::OriginChannel(origin_channel_id.to_string());

    Attachment {
        fields: vec![
            AttachmentField {
                title: TASK_FIELD_TITLE.to_string(),
                value: task_text.to_string(),
                short: false,
            },
            AttachmentField {
                title: ASSIGNER_FIELD_TITLE.to_string(),
                value: format!("<@{assigner_id}>"),
                short: true,
            },
        ],
        actions: vec![complete_button()],
        ..Attachment::titled("New Task!", text, token.as_str())
    }
}

/// Announcement posted back to the channel the task was requested from.
#[must_use]
pub fn completion_notice(completer_id: &str, task_description: Option<&str>) -> Attachment {
    let text = match task_description {
        Some(desc) if !desc.is_empty() => {
            format!("<@{completer_id}> has completed your task:\n\n'{desc}'")
        }
        _ => format!("<@{completer_id}> has completed your task!"),
    };
    Attachment::titled("Task Completed!", text, CorrelationToken::TASK_COMPLETED)
}

/// The completed state of a task message. Text and fields are copied from
/// the open task unchanged; only the title, button and token change.
#[must_use]
pub fn completed_task(open_task: &Attachment) -> Attachment {
    Attachment {
        color: Some(ACCENT_COLOR.to_string()),
        title: Some("Completed Task.".to_string()),
        text: open_task.text.clone(),
        fields: open_task.fields.clone(),
        callback_id: Some(CorrelationToken::DISABLED.to_string()),
        attachment_type: Some(ATTACHMENT_TYPE.to_string()),
        actions: vec![completed_button()],
    }
}

/// Sent to the assigner when a mention had no task text after it.
#[must_use]
pub fn empty_task_error(target_user_id: &str) -> Attachment {
    let text = format!(
        "Your message to <@{target_user_id}> did not include a task. Add the task description right after the mention, like `@someone Take out the trash.`"
    );
    Attachment {
        actions: vec![tutorial_button()],
        ..Attachment::titled("Missing Task", text, CorrelationToken::ERROR)
    }
}

/// Sent when a message is not a task command.
#[must_use]
pub fn intro() -> Attachment {
    let text = "Hi! I'm DonutBot. I assign tasks to your teammates: tag someone and describe the task in the same message.".to_string();
    Attachment {
        actions: vec![tutorial_button()],
        ..Attachment::titled("Welcome to DonutBot", text, CorrelationToken::INTRO)
    }
}

#[must_use]
pub fn tutorial() -> Attachment {
    Attachment::titled(
        "Tutorial",
        TUTORIAL_TEXT.to_string(),
        CorrelationToken::TUTORIAL,
    )
}
