//! Slack API client module
//!
//! The core talks to Slack only through [`MessagingApi`]; [`SlackClient`] is
//! the Web API implementation. Calls are made once with no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::{SlackApiToken, SlackApiTokenValue};
use std::time::Duration;
use tracing::warn;

use super::attachments::Attachment;
use crate::errors::SlackError;

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Outbound messaging operations the bot needs from the platform.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Post a message made of `attachments` into `channel_id`. A user id is
    /// accepted as a channel and addresses the bot's DM with that user.
    async fn post_message(
        &self,
        channel_id: &str,
        attachments: &[Attachment],
    ) -> Result<(), SlackError>;

    /// Replace the attachments of the message at `ts` in `channel_id`.
    async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        attachments: &[Attachment],
    ) -> Result<(), SlackError>;

    /// Open (or fetch) the direct-message channel with `user_id`.
    async fn open_dm(&self, user_id: &str) -> Result<String, SlackError>;
}

#[must_use]
pub fn build_post_message_payload(channel_id: &str, attachments: &[Attachment]) -> Value {
    json!({
        "channel": channel_id,
        "attachments": attachments,
    })
}

#[must_use]
pub fn build_update_message_payload(
    channel_id: &str,
    ts: &str,
    attachments: &[Attachment],
) -> Value {
    json!({
        "channel": channel_id,
        "ts": ts,
        "attachments": attachments,
    })
}

#[must_use]
pub fn build_open_dm_payload(user_id: &str) -> Value {
    json!({ "users": user_id })
}

/// Slack Web API client for one team's bot token.
pub struct SlackClient {
    token: SlackApiToken,
    api_base_url: String,
    session_client: Option<SlackHyperClient>,
}

impl SlackClient {
    /// Every Web API call this client makes, including those that go through
    /// slack-morphism, is sent to `api_base_url`.
    #[must_use]
    pub fn with_api_base_url(token: String, api_base_url: &str) -> Self {
        let api_base_url = api_base_url.trim_end_matches('/').to_string();
        // Build the connector without panicking; call sites surface a SlackError instead.
        let session_client = match SlackClientHyperConnector::new() {
            Ok(connector) => Some(SlackHyperClient::new(
                connector.with_slack_api_url(&api_base_url),
            )),
            Err(e) => {
                warn!("Failed to create Slack HTTP connector: {}", e);
                None
            }
        };
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
            api_base_url,
            session_client,
        }
    }

    fn session_client(&self) -> Result<&SlackHyperClient, SlackError> {
        self.session_client.as_ref().ok_or_else(|| {
            SlackError::GeneralError("Slack HTTP connector not initialized".to_string())
        })
    }

    /// Resolve the bot's own user id with `auth.test`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn get_bot_user_id(&self) -> Result<String, SlackError> {
        let session = self.session_client()?.open_session(&self.token);
        let test_resp = session.auth_test().await?;
        Ok(test_resp.user_id.0)
    }

    /// POST a JSON body to a Web API method and check Slack's `ok` flag.
    async fn call_api(&self, method: &str, payload: &Value) -> Result<Value, SlackError> {
        let url = format!("{}/{method}", self.api_base_url);
        let resp = HTTP_CLIENT
            .post(&url)
            .bearer_auth(&self.token.token_value.0)
            .json(payload)
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("{method}: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "{method} HTTP {}",
                resp.status()
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| SlackError::ApiError(format!("{method} JSON parse error: {e}")))?;

        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(SlackError::ApiError(format!(
                "{method} error: {}",
                body.get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl MessagingApi for SlackClient {
    async fn post_message(
        &self,
        channel_id: &str,
        attachments: &[Attachment],
    ) -> Result<(), SlackError> {
        let payload = build_post_message_payload(channel_id, attachments);
        self.call_api("chat.postMessage", &payload).await?;
        Ok(())
    }

    async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        attachments: &[Attachment],
    ) -> Result<(), SlackError> {
        let payload = build_update_message_payload(channel_id, ts, attachments);
        self.call_api("chat.update", &payload).await?;
        Ok(())
    }

    async fn open_dm(&self, user_id: &str) -> Result<String, SlackError> {
        // conversations.open returns the existing IM channel if there is one.
        let body = self
            .call_api("conversations.open", &build_open_dm_payload(user_id))
            .await?;
        body.get("channel")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                SlackError::ApiError("conversations.open returned no channel id".to_string())
            })
    }
}
