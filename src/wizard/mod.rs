//! Interactive collection of operator input.

mod prompts;

pub use prompts::{BotAnswers, WizardError, ask_server_ip, collect_bot_answers};

/// Horizontal rule used by the wizard's section banners.
pub const RULE: &str = "============================================================";
