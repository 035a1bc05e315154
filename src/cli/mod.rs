//! CLI command handlers
//!
//! Each subcommand lives in its own module with a `handle` entry point.

pub mod generate;
pub mod helpers;
pub mod merge;
pub mod palette;
