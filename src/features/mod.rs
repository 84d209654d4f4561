pub mod complete;
pub mod dispatch;
pub mod parse;
pub mod tutorial;

pub use complete::{InteractionOutcome, handle_interaction};
pub use dispatch::dispatch;
pub use parse::parse;
pub use tutorial::send_tutorial;
