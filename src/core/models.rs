use serde::Deserialize;

use crate::slack::attachments::Attachment;

/// An inbound message the bot can see, either in its DM or in a channel it
/// was invited to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub text: String,
    pub sender_id: String,
    pub channel_id: String,
    /// Sent in the sender's DM with the bot.
    pub is_direct: bool,
}

/// One `@user task` pair extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub target_user_id: String,
    /// May be empty; the dispatcher answers that with an error notice.
    pub task_text: String,
}

impl Command {
    #[must_use]
    pub fn new(target_user_id: impl Into<String>, task_text: impl Into<String>) -> Self {
        Self {
            target_user_id: target_user_id.into(),
            task_text: task_text.into(),
        }
    }
}

/// The message text does not have the shape of a task command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotACommand;

/// Routing state carried in an attachment's `callback_id` and echoed back
/// by Slack when its button is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrelationToken {
    /// An open task; the id is the channel the assignment was typed in.
    OriginChannel(String),
    /// Error notice for an empty task; the button shows the tutorial.
    Error,
    /// Intro offer for a message that was not a command.
    Intro,
    /// A completed task. Terminal.
    Disabled,
}

impl CorrelationToken {
    pub const ERROR: &'static str = "error";
    pub const INTRO: &'static str = "intro";
    pub const DISABLED: &'static str = "disabled";

    /// Tokens on messages that carry no button.
    pub const TASK_COMPLETED: &'static str = "task completed";
    pub const TUTORIAL: &'static str = "tutorial";

    /// Decodes a `callback_id`. Returns `None` for tokens that never carry an
    /// actionable button.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" | Self::TASK_COMPLETED | Self::TUTORIAL => None,
            Self::ERROR => Some(Self::Error),
            Self::INTRO => Some(Self::Intro),
            Self::DISABLED => Some(Self::Disabled),
            channel => Some(Self::OriginChannel(channel.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OriginChannel(channel) => channel,
            Self::Error => Self::ERROR,
            Self::Intro => Self::INTRO,
            Self::Disabled => Self::DISABLED,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdRef {
    #[serde(default)]
    pub id: String,
}

/// The message the clicked button belongs to, as echoed by Slack.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OriginalMessage {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// `interactive_message` payload posted to `/actions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionPayload {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub callback_id: String,
    #[serde(default)]
    pub team: IdRef,
    #[serde(default)]
    pub user: IdRef,
    #[serde(default)]
    pub channel: IdRef,
    #[serde(default)]
    pub original_message: Option<OriginalMessage>,
}

impl InteractionPayload {
    #[must_use]
    pub fn correlation_token(&self) -> Option<CorrelationToken> {
        CorrelationToken::decode(&self.callback_id)
    }
}
