//! Standalone validator for generated settings files.
//!
//! Checks a `.env` produced by the setup wizard (or edited by hand) for
//! missing keys and malformed values before the bot is started with it.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;

use awg_bot_setup::awg::PARAM_ENV_KEYS;
use awg_bot_setup::netinfo::is_dotted_quad;

/// Keys the wizard always writes; each must be present and non-empty.
/// The nine obfuscation parameter keys are required on top of these.
const REQUIRED_KEYS: [&str; 13] = [
    "BOT_TOKEN",
    "ADMIN_ID",
    "USERS",
    "AWG_CONTAINER",
    "AWG_CONFIG_PATH",
    "PORT",
    "SERVER_ENDPOINT",
    "CLIENT_NETWORK",
    "CLIENT_IP_START",
    "DNS_SERVERS",
    "DATABASE_PATH",
    "LOG_LEVEL",
    "LOG_FILE",
];

/// Keys that may legitimately be empty; an empty value is only warned about.
const KEY_MATERIAL_KEYS: [&str; 2] = ["SERVER_PUBLIC_KEY", "PRESHARED_KEY"];

/// Settings file validator.
#[derive(Parser, Debug)]
#[command(name = "validate_env")]
#[command(about = "Validates a settings file generated by the AmneziaWG bot setup wizard")]
#[command(version)]
struct Args {
    /// Path to the settings file to validate.
    #[arg(short, long, default_value = ".env")]
    file: String,

    /// Show every key as it is checked.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let vars = match load_env(&args.file) {
        Ok(vars) => vars,
        Err(e) => {
            eprintln!("✗ Failed to load {}: {e}", args.file);
            return ExitCode::FAILURE;
        }
    };

    validate_file(&args.file, &vars, args.verbose)
}

fn load_env(path: &str) -> Result<HashMap<String, String>, dotenvy::Error> {
    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    Ok(vars)
}

#[allow(clippy::too_many_lines)]
fn validate_file(path: &str, vars: &HashMap<String, String>, verbose: bool) -> ExitCode {
    println!("Validating: {path}");
    println!("Loaded {} keys\n", vars.len());

    let mut errors = 0;
    let mut warnings = 0;

    // Presence of everything the wizard always writes
    for key in REQUIRED_KEYS.into_iter().chain(PARAM_ENV_KEYS) {
        match value(vars, key) {
            Some(v) => {
                if verbose {
                    println!("  ✓ {key} = {}", display_value(key, v));
                }
            }
            None => {
                errors += 1;
                println!("  ✗ {key} is missing or empty");
            }
        }
    }

    // Numeric fields
    for key in ["ADMIN_ID", "PORT"].into_iter().chain(PARAM_ENV_KEYS) {
        if let Some(v) = value(vars, key)
            && !v.chars().all(|c| c.is_ascii_digit())
        {
            errors += 1;
            println!("  ✗ {key} must be a number: {v:?}");
        }
    }

    // Address-shaped fields
    if let Some(network) = value(vars, "CLIENT_NETWORK")
        && !is_cidr(network)
    {
        errors += 1;
        println!("  ✗ CLIENT_NETWORK must be an IPv4 network in CIDR form: {network:?}");
    }

    if let Some(ip) = value(vars, "CLIENT_IP_START")
        && !is_dotted_quad(ip)
    {
        errors += 1;
        println!("  ✗ CLIENT_IP_START must be an IPv4 address: {ip:?}");
    }

    if let Some(endpoint) = value(vars, "SERVER_ENDPOINT") {
        match endpoint.rsplit_once(':') {
            Some((host, port))
                if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) =>
            {
                if !is_dotted_quad(host) {
                    warnings += 1;
                    if verbose {
                        println!("  ⚠ SERVER_ENDPOINT host is not a plain IPv4 address: {host}");
                    }
                }
            }
            _ => {
                errors += 1;
                println!("  ✗ SERVER_ENDPOINT must look like ip:port, got {endpoint:?}");
            }
        }
    }

    // Allow-list entries should be numeric Telegram IDs
    if let Some(users) = value(vars, "USERS") {
        for entry in users.split(',') {
            let entry = entry.trim();
            if !entry.is_empty() && !entry.chars().all(|c| c.is_ascii_digit()) {
                warnings += 1;
                if verbose {
                    println!("  ⚠ USERS entry is not a numeric Telegram ID: {entry:?}");
                }
            }
        }
    }

    if let Some(servers) = value(vars, "DNS_SERVERS") {
        for entry in servers.split(',') {
            let entry = entry.trim();
            if !entry.is_empty() && !is_dotted_quad(entry) {
                warnings += 1;
                if verbose {
                    println!("  ⚠ DNS_SERVERS entry is not an IPv4 address: {entry:?}");
                }
            }
        }
    }

    // Empty key material keeps the bot running but clients cannot connect
    for key in KEY_MATERIAL_KEYS {
        if value(vars, key).is_none() {
            warnings += 1;
            if verbose {
                println!("  ⚠ {key} is empty");
            }
        }
    }

    println!();

    if errors == 0 {
        println!("✓ Settings file is valid!");
        if warnings > 0 {
            println!("  ({warnings} warning(s) - run with --verbose for details)");
        }
        ExitCode::SUCCESS
    } else {
        println!("✗ Validation failed: {errors} error(s), {warnings} warning(s)");
        ExitCode::FAILURE
    }
}

/// Non-empty value of `key`, if present.
fn value<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Renders a value for verbose output, masking the bot token.
fn display_value(key: &str, v: &str) -> String {
    if key == "BOT_TOKEN" {
        mask_token(v)
    } else {
        v.to_owned()
    }
}

/// Masks a bot token for display (keeps the numeric bot ID, hides the secret).
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{id}:***"),
        None => "***".to_owned(),
    }
}

/// Checks for `a.b.c.d/len` shape.
fn is_cidr(s: &str) -> bool {
    match s.split_once('/') {
        Some((addr, prefix)) => {
            is_dotted_quad(addr)
                && !prefix.is_empty()
                && prefix.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
