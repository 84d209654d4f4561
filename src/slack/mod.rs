//! All Slack-specific functionality

pub mod attachments;
pub mod client;

// Re-export main types for convenience
pub use attachments::{Attachment, AttachmentAction, AttachmentField};
pub use client::{MessagingApi, SlackClient};
