use std::sync::Arc;

use donutbot::api::{AppState, handler};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    donutbot::setup_logging();

    let state = match AppState::from_env().await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Startup failed: {:#}", e);
            return Err(e.into());
        }
    };

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move { handler(&state, event).await }
    }))
    .await
}
