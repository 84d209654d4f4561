//! Configuration, team lookup and the data model shared by all handlers.

pub mod config;
pub mod models;
pub mod teams;
