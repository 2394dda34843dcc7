//! AmneziaWG Bot Setup Library
//!
//! A one-shot setup wizard for the AmneziaWG Telegram bot.
//!
//! This crate provides the core functionality for:
//! - Checking that Docker and the AmneziaWG container are available
//! - Extracting server parameters from the container's `wg0.conf`
//! - Deriving the server public key via `wg pubkey`
//! - Discovering the host's public IP address
//! - Collecting bot credentials interactively
//! - Writing the consolidated `.env` settings file

pub mod awg;
pub mod docker;
pub mod netinfo;
pub mod settings;
pub mod wizard;
