//! DonutBot - a Slack bot that assigns tasks to teammates.
//!
//! A user DMs the bot a message such as `@Will Take out the trash. @Molly Do
//! the dishes.`; each mentioned user receives a task with a "Complete?"
//! button, and clicking it announces the completion in the channel the task
//! was requested from.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda behind an HTTP front door (`/events`, `/actions`, `/tutorial`)
//! - slack-morphism and reqwest for Slack Web API calls
//! - AWS SSM Parameter Store for per-team bot credentials
//!
//! No task state is stored server-side: each task message carries its own
//! state in its attachment, and Slack echoes it back on every button click.
//!
//! # Example
//!
//! ```
//! use donutbot::core::models::Command;
//! use donutbot::features::parse;
//!
//! let commands = parse("<@U1> Take out the trash. <@U2> Do the dishes.").unwrap();
//! assert_eq!(commands[0], Command::new("U1", "Take out the trash."));
//! assert_eq!(commands[1], Command::new("U2", "Do the dishes."));
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod slack;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. The level comes from `RUST_LOG` and defaults to `info`. Calling it
/// more than once is harmless.
///
/// # Example
///
/// ```
/// donutbot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
