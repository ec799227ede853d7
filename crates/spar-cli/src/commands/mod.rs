//! Subcommands

pub mod chat;
pub mod clean;
pub mod info;
