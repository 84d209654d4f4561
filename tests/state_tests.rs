use std::collections::HashMap;

use donutbot::api::AppState;
use donutbot::core::config::AppConfig;

fn config(vars: &[(&str, &str)]) -> AppConfig {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|k| map.get(k).cloned()).unwrap()
}

#[tokio::test]
async fn test_single_team_with_known_bot_user_loads_offline() {
    let state = AppState::load(config(&[
        ("SLACK_VERIFICATION_TOKEN", "tok"),
        ("SLACK_TEAM_ID", "T1"),
        ("SLACK_BOT_TOKEN", "xoxb-1"),
        ("SLACK_BOT_USER_ID", "UBOT"),
    ]))
    .await
    .unwrap();

    assert_eq!(state.teams.require("T1").unwrap().bot_user_id, "UBOT");
    assert!(state.teams.get("T2").is_none());
}

#[tokio::test]
async fn test_failed_team_load_names_the_startup_step() {
    let err = AppState::load(config(&[
        ("SLACK_VERIFICATION_TOKEN", "tok"),
        ("SLACK_API_BASE_URL", "http://127.0.0.1:1"),
        ("SLACK_TEAM_ID", "T1"),
        ("SLACK_BOT_TOKEN", "xoxb-1"),
    ]))
    .await
    .unwrap_err();

    let rendered = format!("{err:#}");
    assert!(rendered.starts_with("loading team credentials: "), "{rendered}");
}
