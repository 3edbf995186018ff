//! CLI module
//!
//! Command-line interface for the gateway.
//!
//! # Commands
//!
//! - `serve` - Start HTTP server mode
//! - `songs` - Print an artist's songs as JSON
//! - `albums` - Print an artist's albums as JSON
//! - `config` - Print the effective configuration

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, ListArgs};
pub use runner::Runner;
pub use server::{router, serve};
