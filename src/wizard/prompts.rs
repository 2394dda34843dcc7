//! Wizard prompts and input validation.
//!
//! Prompts accept empty input and validation happens afterwards, so a blank
//! answer aborts with a targeted message instead of re-prompting forever.

use dialoguer::Input;
use thiserror::Error;

use super::RULE;

/// Errors that can occur while collecting operator input.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("bot token is required")]
    TokenRequired,

    #[error("Telegram ID must be a number")]
    AdminIdInvalid,

    #[error("server IP address is required")]
    ServerIpRequired,

    #[error("interrupted by user")]
    Interrupted,

    #[error("prompt failed")]
    Prompt(#[source] dialoguer::Error),
}

/// Everything the operator types in during the Telegram section.
#[derive(Debug, Clone)]
pub struct BotAnswers {
    /// Bot API token from `@BotFather`.
    pub token: String,

    /// Administrator's numeric Telegram ID.
    pub admin_id: String,

    /// Comma-separated allow-list, verbatim past the emptiness check.
    pub users: String,
}

/// Walks the operator through the Telegram bot section of the wizard.
///
/// # Errors
///
/// Returns an error on a blank token, a non-numeric administrator ID, an
/// interrupt, or a terminal fault.
pub fn collect_bot_answers() -> Result<BotAnswers, WizardError> {
    println!("\n{RULE}");
    println!("Telegram bot setup");
    println!("{RULE}");

    println!("\n1. Get a bot token from @BotFather in Telegram:");
    println!("   - Open @BotFather");
    println!("   - Send /newbot");
    println!("   - Follow the instructions");

    let token = require_token(&prompt("Bot token")?)?;

    println!("\n2. Get your Telegram ID from @userinfobot:");
    println!("   - Open @userinfobot");
    println!("   - Send /start");

    let admin_id = require_admin_id(&prompt("Your Telegram ID (administrator)")?)?;

    println!("\n3. Allowed users");
    println!("   Enter Telegram IDs separated by commas,");
    println!("   or press Enter to allow only yourself ({admin_id})");

    let users = normalize_users(&prompt("User Telegram IDs")?, &admin_id);

    Ok(BotAnswers {
        token,
        admin_id,
        users,
    })
}

/// Asks for the server's public IP after automatic discovery failed.
///
/// # Errors
///
/// Returns an error on blank input, an interrupt, or a terminal fault.
pub fn ask_server_ip() -> Result<String, WizardError> {
    require_server_ip(&prompt("External IP address of your server")?)
}

fn prompt(label: &str) -> Result<String, WizardError> {
    Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(map_prompt_error)
}

fn map_prompt_error(e: dialoguer::Error) -> WizardError {
    match e {
        dialoguer::Error::IO(io_err)
            if io_err.kind() == std::io::ErrorKind::Interrupted =>
        {
            WizardError::Interrupted
        }
        other => WizardError::Prompt(other),
    }
}

fn require_token(raw: &str) -> Result<String, WizardError> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(WizardError::TokenRequired);
    }
    Ok(token.to_owned())
}

fn require_admin_id(raw: &str) -> Result<String, WizardError> {
    let id = raw.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(WizardError::AdminIdInvalid);
    }
    Ok(id.to_owned())
}

fn require_server_ip(raw: &str) -> Result<String, WizardError> {
    let ip = raw.trim();
    if ip.is_empty() {
        return Err(WizardError::ServerIpRequired);
    }
    Ok(ip.to_owned())
}

/// A blank allow-list collapses to the administrator alone; anything else
/// is taken verbatim.
fn normalize_users(raw: &str, admin_id: &str) -> String {
    let users = raw.trim();
    if users.is_empty() {
        admin_id.to_owned()
    } else {
        users.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_token_trims_and_accepts() {
        assert_eq!(require_token("  123:abc  ").unwrap(), "123:abc");
    }

    #[test]
    fn test_require_token_rejects_blank() {
        assert!(matches!(require_token(""), Err(WizardError::TokenRequired)));
        assert!(matches!(
            require_token("   "),
            Err(WizardError::TokenRequired)
        ));
    }

    #[test]
    fn test_require_admin_id_accepts_digits() {
        assert_eq!(require_admin_id("123456789").unwrap(), "123456789");
        assert_eq!(require_admin_id(" 42 ").unwrap(), "42");
    }

    #[test]
    fn test_require_admin_id_rejects_non_digits() {
        assert!(matches!(
            require_admin_id("abc"),
            Err(WizardError::AdminIdInvalid)
        ));
        assert!(matches!(
            require_admin_id("12 34"),
            Err(WizardError::AdminIdInvalid)
        ));
        assert!(matches!(
            require_admin_id("-5"),
            Err(WizardError::AdminIdInvalid)
        ));
        assert!(matches!(
            require_admin_id(""),
            Err(WizardError::AdminIdInvalid)
        ));
    }

    #[test]
    fn test_normalize_users_defaults_to_admin() {
        assert_eq!(normalize_users("", "42"), "42");
        assert_eq!(normalize_users("   ", "42"), "42");
    }

    #[test]
    fn test_normalize_users_keeps_list_verbatim() {
        assert_eq!(normalize_users("1,2,3", "42"), "1,2,3");
        // Inner spacing is preserved, only the ends are trimmed
        assert_eq!(normalize_users(" 1, 2 ", "42"), "1, 2");
        // Contents past the emptiness check are not validated
        assert_eq!(normalize_users("alice,bob", "42"), "alice,bob");
    }

    #[test]
    fn test_require_server_ip() {
        assert_eq!(require_server_ip(" 203.0.113.7 ").unwrap(), "203.0.113.7");
        assert!(matches!(
            require_server_ip(""),
            Err(WizardError::ServerIpRequired)
        ));
        // Any non-blank text is accepted, hostnames included
        assert_eq!(require_server_ip("vpn.example.com").unwrap(), "vpn.example.com");
    }
}
