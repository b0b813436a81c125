//! CLI, configuration, date parsing and report rendering
//!
//! This crate provides the `calstat` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
