//! Subcommand implementations.

pub mod new;
pub mod show;
