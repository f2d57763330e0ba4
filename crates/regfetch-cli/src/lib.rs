//! regfetch command line — config resolution, subcommands, console output.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{build_config, load_catalog, Overrides};
