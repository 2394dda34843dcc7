//! Settings file rendering and emission.
//!
//! The output is a flat `KEY=value` file grouped under comment headers,
//! consumed later by the bot itself. Values the extraction step could not
//! provide fall back to the defaults in [`crate::awg::defaults`]; the
//! constants below are written as-is on every run.

mod env;
mod writer;

pub use env::EnvSettings;
pub use writer::{EnvWriteError, write_with_backup};

/// DNS servers handed out to clients.
pub const DNS_SERVERS: &str = "1.1.1.1,1.0.0.1";

/// Bot database location.
pub const DATABASE_PATH: &str = "data/database.db";

/// Bot log level.
pub const LOG_LEVEL: &str = "INFO";

/// Bot log file location.
pub const LOG_FILE: &str = "logs/bot.log";
