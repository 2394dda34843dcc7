//! AmneziaWG Bot Setup - Main Entry Point
//!
//! One-shot wizard that checks the Docker environment, extracts server
//! parameters from the AmneziaWG container, discovers the host's public IP,
//! collects bot credentials, and writes the bot's `.env` settings file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use awg_bot_setup::awg::{self, ServerProfile};
use awg_bot_setup::docker::{CommandRunner, DEFAULT_COMMAND_TIMEOUT_SECS, DockerClient};
use awg_bot_setup::netinfo;
use awg_bot_setup::settings::{EnvSettings, write_with_backup};
use awg_bot_setup::wizard::{self, RULE, WizardError};

/// Interactive setup wizard for the AmneziaWG Telegram bot.
#[derive(Parser, Debug)]
#[command(name = "awg_setup")]
#[command(about = "Configures the AmneziaWG Telegram bot and writes its .env file")]
#[command(version)]
struct Args {
    /// Name of the AmneziaWG Docker container.
    #[arg(long, default_value = "amnezia-awg")]
    container: String,

    /// Path of the settings file to write.
    #[arg(short, long, default_value = ".env")]
    output: PathBuf,

    /// Time cap for each external command, in seconds.
    #[arg(long, default_value_t = DEFAULT_COMMAND_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args.log_level);

    let result = tokio::select! {
        result = run(&args) => result,
        _ = tokio::signal::ctrl_c() => Err(WizardError::Interrupted.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

/// The whole pipeline, strictly linear: preflight, extraction, IP
/// discovery, prompts, emission. Every abort path is an early return.
async fn run(args: &Args) -> Result<()> {
    println!("{RULE}");
    println!("AmneziaWG Config Bot - automatic setup");
    println!("{RULE}");

    let runner = CommandRunner::new(args.timeout_secs);
    let docker = DockerClient::new(runner.clone(), args.container.clone());

    println!("\nChecking Docker...");
    let version = docker.version().await.context("Docker check failed")?;
    println!("✓ {version}");

    println!("\nChecking the AmneziaWG container...");
    let names = docker
        .container_running()
        .await
        .context("Make sure AmneziaWG is installed and running")?;
    println!("✓ Container found: {names}");

    println!("\nReading the server configuration...");
    let text = docker
        .read_server_config()
        .await
        .context("Failed to read the server configuration")?;

    let mut profile = awg::extract_profile(&text);
    if let Some(private_key) = profile.private_key.clone() {
        let public_key = docker
            .derive_public_key(&private_key)
            .await
            .context("Failed to derive the server public key")?;
        profile.public_key = Some(public_key);
    }
    print_profile_summary(&profile);

    println!("\nDetecting the external IP address...");
    let server_ip = match netinfo::discover_public_ip(&runner).await {
        Some(ip) => {
            println!("✓ External IP: {ip}");
            ip
        }
        None => {
            println!("⚠ Could not detect the external IP automatically");
            wizard::ask_server_ip()?
        }
    };

    let answers = wizard::collect_bot_answers()?;

    println!("\nWriting the settings file...");
    let settings = EnvSettings {
        bot_token: answers.token,
        admin_id: answers.admin_id,
        users: answers.users,
        server_ip,
        container: docker.container_name().to_owned(),
        profile,
    };

    let backup = write_with_backup(&args.output, &settings.render())
        .context("Failed to write the settings file")?;
    if let Some(backup) = backup {
        println!("✓ Previous settings backed up to: {}", backup.display());
    }
    println!("✓ Settings file created: {}", args.output.display());

    println!("\n{RULE}");
    println!("✓ Setup finished successfully!");
    println!("{RULE}");
    println!("\nNext steps:");
    println!("   1. Review the {} file", args.output.display());
    println!("   2. Start the bot: sudo systemctl start amneziabot");
    println!("   3. Check its status: sudo systemctl status amneziabot");
    println!("   4. Send /start to your bot in Telegram");
    println!("\nDone! The bot is configured and ready.");

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_profile_summary(profile: &ServerProfile) {
    let public_key = profile
        .public_key
        .as_deref()
        .map_or_else(|| "N/A".to_owned(), |key| truncate(key, 20));

    println!("\n✓ Server configuration extracted:");
    println!("   - Public key: {public_key}");
    println!(
        "   - Port: {}",
        profile.listen_port.as_deref().unwrap_or("N/A")
    );
    println!(
        "   - Client network: {}",
        profile.client_network.as_deref().unwrap_or("N/A")
    );
    println!(
        "   - Next client IP: {}",
        profile.client_ip_start.as_deref().unwrap_or("N/A")
    );
}

/// Prints the failure and maps it to the process exit status. An operator
/// interrupt gets its own message instead of an error chain.
fn report_failure(e: &anyhow::Error) -> ExitCode {
    if matches!(
        e.downcast_ref::<WizardError>(),
        Some(WizardError::Interrupted)
    ) {
        eprintln!("\n⚠ Setup interrupted by user");
    } else {
        eprintln!("\n✗ Setup failed: {e:#}");
    }
    ExitCode::FAILURE
}

/// Truncates a string for display.
fn truncate(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", chars[..max_len].iter().collect::<String>())
    }
}
