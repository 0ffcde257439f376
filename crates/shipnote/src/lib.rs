pub mod actions;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod logging;
pub mod notifier;
pub mod payload;
pub mod sink;
