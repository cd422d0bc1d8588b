//! CLI subcommands

pub mod browse;
pub mod latest;
pub mod list;
pub mod post;
