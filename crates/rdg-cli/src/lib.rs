//! Gateway session reconciler CLI library.
//!
//! This crate provides the command-line interface over the `rdg-core`
//! reconciliation engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
