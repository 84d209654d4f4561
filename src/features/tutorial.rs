use tracing::info;

use crate::core::teams::Team;
use crate::errors::SlackError;
use crate::slack::attachments;

/// DM the static tutorial to `user_id`.
///
/// # Errors
///
/// Returns an error if the DM channel cannot be opened or the post fails.
pub async fn send_tutorial(team: &Team, user_id: &str) -> Result<(), SlackError> {
    let channel_id = team.client.open_dm(user_id).await?;
    team.client
        .post_message(&channel_id, &[attachments::tutorial()])
        .await?;
    info!(user_id = %user_id, channel_id = %channel_id, "Sent tutorial");
    Ok(())
}
