#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use donutbot::api::AppState;
use donutbot::core::config::AppConfig;
use donutbot::core::teams::{Team, TeamRegistry};
use donutbot::errors::SlackError;
use donutbot::slack::{Attachment, MessagingApi};
use serde_json::Value;

pub const TEAM_ID: &str = "T1";
pub const BOT_USER_ID: &str = "UBOT";
pub const VERIFICATION_TOKEN: &str = "verify-me";
pub const DM_CHANNEL: &str = "D_DM";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Post {
        channel: String,
        attachments: Vec<Attachment>,
    },
    Update {
        channel: String,
        ts: String,
        attachments: Vec<Attachment>,
    },
    OpenDm {
        user: String,
    },
}

/// In-memory `MessagingApi` that records every call.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    fail_posts: bool,
    fail_updates: bool,
    fail_open_dm: bool,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_posts() -> Arc<Self> {
        Arc::new(Self {
            fail_posts: true,
            ..Self::default()
        })
    }

    pub fn failing_updates() -> Arc<Self> {
        Arc::new(Self {
            fail_updates: true,
            ..Self::default()
        })
    }

    pub fn failing_open_dm() -> Arc<Self> {
        Arc::new(Self {
            fail_open_dm: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<(String, Vec<Attachment>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Post {
                    channel,
                    attachments,
                } => Some((channel, attachments)),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(String, String, Vec<Attachment>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update {
                    channel,
                    ts,
                    attachments,
                } => Some((channel, ts, attachments)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MessagingApi for RecordingClient {
    async fn post_message(
        &self,
        channel_id: &str,
        attachments: &[Attachment],
    ) -> Result<(), SlackError> {
        self.record(Call::Post {
            channel: channel_id.to_string(),
            attachments: attachments.to_vec(),
        });
        if self.fail_posts {
            return Err(SlackError::ApiError("chat.postMessage error: channel_not_found".into()));
        }
        Ok(())
    }

    async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        attachments: &[Attachment],
    ) -> Result<(), SlackError> {
        self.record(Call::Update {
            channel: channel_id.to_string(),
            ts: ts.to_string(),
            attachments: attachments.to_vec(),
        });
        if self.fail_updates {
            return Err(SlackError::ApiError("chat.update error: message_not_found".into()));
        }
        Ok(())
    }

    async fn open_dm(&self, user_id: &str) -> Result<String, SlackError> {
        self.record(Call::OpenDm {
            user: user_id.to_string(),
        });
        if self.fail_open_dm {
            return Err(SlackError::ApiError("conversations.open error: user_not_found".into()));
        }
        Ok(DM_CHANNEL.to_string())
    }
}

pub fn team(client: &Arc<RecordingClient>) -> Team {
    Team::new(client.clone(), BOT_USER_ID)
}

pub fn registry(client: &Arc<RecordingClient>) -> TeamRegistry {
    let mut teams = HashMap::new();
    teams.insert(TEAM_ID.to_string(), team(client));
    TeamRegistry::new(teams)
}

pub fn config() -> AppConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SLACK_VERIFICATION_TOKEN", VERIFICATION_TOKEN),
        ("SLACK_TEAM_ID", TEAM_ID),
        ("SLACK_BOT_TOKEN", "xoxb-test"),
        ("SLACK_BOT_USER_ID", BOT_USER_ID),
    ]);
    AppConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string())).unwrap()
}

pub fn state(client: &Arc<RecordingClient>) -> AppState {
    AppState::new(config(), registry(client))
}

/// Status code of a handler response envelope.
pub fn status_code(response: &Value) -> Option<u16> {
    response
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|c| u16::try_from(c).ok())
}
