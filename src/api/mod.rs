//! API Lambda handler and request processing

pub mod event_handler;
pub mod handler;
pub mod helpers;
pub mod interactive_handler;
pub mod parsing;
pub mod state;
pub mod tutorial_handler;
pub mod verification;

// Re-export the main handler for convenience
pub use handler::{function_handler as handler, route};
pub use state::AppState;
