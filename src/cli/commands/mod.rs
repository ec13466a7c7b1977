//! CLI subcommand implementations

pub mod ask;
pub mod config;
pub mod docs;
