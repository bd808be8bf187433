//! # leaflet-cli
//!
//! Library half of the `leaflet` binary: argument definitions,
//! configuration loading, logging setup and command handlers. `main.rs`
//! only wires them together.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{CliError, CliResult};
