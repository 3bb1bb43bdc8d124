//! CLI subcommand implementations.

pub mod record;
pub mod render;
