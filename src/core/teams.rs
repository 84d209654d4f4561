//! Per-team bot identity and messaging client lookup.
//!
//! The registry is built once at cold start and only read afterwards, so it
//! is shared across concurrent invocations behind an `Arc` with no locking.

use aws_sdk_ssm::Client as SsmClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::config::{AppConfig, TeamSource};
use crate::errors::SlackError;
use crate::slack::{MessagingApi, SlackClient};

/// A tenant of the bot.
#[derive(Clone)]
pub struct Team {
    pub client: Arc<dyn MessagingApi>,
    pub bot_user_id: String,
}

impl Team {
    #[must_use]
    pub fn new(client: Arc<dyn MessagingApi>, bot_user_id: impl Into<String>) -> Self {
        Self {
            client,
            bot_user_id: bot_user_id.into(),
        }
    }
}

impl std::fmt::Debug for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Team")
            .field("bot_user_id", &self.bot_user_id)
            .finish_non_exhaustive()
    }
}

/// Stored value of a team's SSM parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTeamCredentials {
    pub bot_token: String,
    #[serde(default)]
    pub bot_user_id: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct TeamRegistry {
    teams: HashMap<String, Team>,
}

impl TeamRegistry {
    #[must_use]
    pub fn new(teams: HashMap<String, Team>) -> Self {
        Self { teams }
    }

    #[must_use]
    pub fn get(&self, team_id: &str) -> Option<&Team> {
        self.teams.get(team_id)
    }

    /// # Errors
    ///
    /// Returns `SlackError::UnknownTeam` when no team is configured for `team_id`.
    pub fn require(&self, team_id: &str) -> Result<&Team, SlackError> {
        self.get(team_id)
            .ok_or_else(|| SlackError::UnknownTeam(team_id.to_string()))
    }

    /// Build the registry from the configured team source.
    ///
    /// # Errors
    ///
    /// Returns an error if SSM cannot be read, a stored credential is not
    /// valid JSON, or a missing bot user id cannot be resolved.
    pub async fn load(config: &AppConfig) -> Result<Self, SlackError> {
        let credentials = match &config.team_source {
            TeamSource::Single {
                team_id,
                bot_token,
                bot_user_id,
            } => vec![(
                team_id.clone(),
                StoredTeamCredentials {
                    bot_token: bot_token.clone(),
                    bot_user_id: bot_user_id.clone(),
                },
            )],
            TeamSource::Ssm { param_prefix } => load_ssm_credentials(param_prefix).await?,
        };

        let mut teams = HashMap::with_capacity(credentials.len());
        for (team_id, creds) in credentials {
            let client =
                SlackClient::with_api_base_url(creds.bot_token, &config.slack_api_base_url);
            let bot_user_id = match creds.bot_user_id {
                Some(id) => id,
                None => client.get_bot_user_id().await?,
            };
            info!(team_id = %team_id, bot_user_id = %bot_user_id, "Registered team");
            teams.insert(team_id, Team::new(Arc::new(client), bot_user_id));
        }

        if teams.is_empty() {
            warn!("No teams configured; every request will be ignored");
        }

        Ok(Self::new(teams))
    }
}

/// The team id is the last path segment of the parameter name.
#[must_use]
pub fn team_id_from_param_name<'a>(prefix: &str, name: &'a str) -> Option<&'a str> {
    let team_id = name
        .strip_prefix(prefix.trim_end_matches('/'))?
        .strip_prefix('/')?;
    (!team_id.is_empty() && !team_id.contains('/')).then_some(team_id)
}

async fn load_ssm_credentials(
    prefix: &str,
) -> Result<Vec<(String, StoredTeamCredentials)>, SlackError> {
    let shared = aws_config::from_env().load().await;
    let client = SsmClient::new(&shared);

    let mut out = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let resp = client
            .get_parameters_by_path()
            .path(prefix)
            .with_decryption(true)
            .set_next_token(next_token.take())
            .send()
            .await
            .map_err(|e| SlackError::AwsError(format!("ssm get_parameters_by_path: {e}")))?;

        for param in resp.parameters() {
            let (Some(name), Some(value)) = (param.name(), param.value()) else {
                continue;
            };
            let Some(team_id) = team_id_from_param_name(prefix, name) else {
                warn!(parameter = %name, "Skipping parameter outside the team prefix");
                continue;
            };
            let creds: StoredTeamCredentials = serde_json::from_str(value)
                .map_err(|e| SlackError::ConfigError(format!("team {team_id} credentials: {e}")))?;
            out.push((team_id.to_string(), creds));
        }

        match resp.next_token() {
            Some(token) => next_token = Some(token.to_string()),
            None => break,
        }
    }

    Ok(out)
}
