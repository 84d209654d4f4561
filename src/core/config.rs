use std::env;

use crate::errors::SlackError;

pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";

/// Where per-team bot credentials come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSource {
    /// One SSM parameter per team under this path; the parameter name's last
    /// segment is the team id.
    Ssm { param_prefix: String },
    /// A single team configured directly through the environment.
    Single {
        team_id: String,
        bot_token: String,
        bot_user_id: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_verification_token: String,
    pub slack_api_base_url: String,
    pub team_source: TeamSource,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `SlackError::ConfigError` when a required variable is missing.
    pub fn from_env() -> Result<Self, SlackError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// `TEAM_PARAM_PREFIX` takes precedence over the single-team variables.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::ConfigError` when a required variable is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SlackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SlackError::ConfigError(format!("{key} is not set")))
        };

        let slack_verification_token = required("SLACK_VERIFICATION_TOKEN")?;
        let slack_api_base_url = lookup("SLACK_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(
                || DEFAULT_SLACK_API_BASE_URL.to_string(),
                |v| v.trim_end_matches('/').to_string(),
            );

        let team_source = match lookup("TEAM_PARAM_PREFIX").filter(|v| !v.trim().is_empty()) {
            Some(param_prefix) => TeamSource::Ssm { param_prefix },
            None => TeamSource::Single {
                team_id: required("SLACK_TEAM_ID")?,
                bot_token: required("SLACK_BOT_TOKEN")?,
                bot_user_id: lookup("SLACK_BOT_USER_ID").filter(|v| !v.trim().is_empty()),
            },
        };

        Ok(Self {
            slack_verification_token,
            slack_api_base_url,
            team_source,
        })
    }
}
