use tracing::error;

use crate::core::config::AppConfig;

/// Check the shared verification token Slack includes in every payload.
#[must_use]
pub fn verify_token(config: &AppConfig, received: Option<&str>) -> bool {
    let Some(received) = received else {
        error!("Request carries no verification token");
        return false;
    };

    if received == config.slack_verification_token {
        true
    } else {
        error!("Verification token mismatch");
        false
    }
}
