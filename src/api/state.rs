use anyhow::Context;

use crate::core::config::AppConfig;
use crate::core::teams::TeamRegistry;

/// Everything a request handler reads. Built once per cold start.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub teams: TeamRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, teams: TeamRegistry) -> Self {
        Self { config, teams }
    }

    /// Read the configuration from the process environment and load every team.
    ///
    /// # Errors
    ///
    /// Returns an error naming the startup step that failed.
    pub async fn from_env() -> anyhow::Result<Self> {
        let config =
            AppConfig::from_env().context("loading configuration from the environment")?;
        Self::load(config).await
    }

    /// Load every team for an already-read configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the startup step that failed.
    pub async fn load(config: AppConfig) -> anyhow::Result<Self> {
        let teams = TeamRegistry::load(&config)
            .await
            .context("loading team credentials")?;
        Ok(Self::new(config, teams))
    }
}
