//! External command execution and Docker access.
//!
//! Every command this tool runs goes through [`CommandRunner`], which bounds
//! execution time and kills children that overrun it. [`DockerClient`] layers
//! the Docker-specific operations on top: daemon check, container check,
//! in-container file reads and `wg pubkey` key derivation.

mod client;
mod runner;

pub use client::{DockerClient, DockerError};
pub use runner::{CommandError, CommandRunner};

/// Default cap on any single external command, in seconds.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;
