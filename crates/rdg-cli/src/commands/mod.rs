//! CLI subcommand implementations.

pub mod daily;
pub mod events;
pub mod merged;
pub mod summary;
pub mod util;
