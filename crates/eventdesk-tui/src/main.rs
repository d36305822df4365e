//! `eventdesk-tui` — terminal front-end for an eventdesk backend.
//!
//! Built on [ratatui](https://ratatui.rs). Screens are navigable via number
//! keys (1-3): Dashboard, Feedback and Forgot password. A successful
//! password reset lands on the Sign-in screen.
//!
//! Logs are written to a file (default `/tmp/eventdesk-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use eventdesk_core::{BearerToken, ClientConfig, EventId, Session, TlsVerification};

use crate::app::App;

/// Terminal dashboard for event statistics, feedback and account recovery.
#[derive(Parser, Debug)]
#[command(name = "eventdesk-tui", version, about)]
struct Cli {
    /// Profile from the eventdesk config file
    #[arg(short = 'p', long, env = "EVENTDESK_PROFILE")]
    profile: Option<String>,

    /// API base URL (e.g., https://events.example.com/api)
    #[arg(short = 'u', long, env = "EVENTDESK_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token for authenticated endpoints
    #[arg(long, env = "EVENTDESK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Accept invalid TLS certificates (local development backends)
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Event whose feedback the Feedback screen opens with
    #[arg(short = 'e', long)]
    event: Option<String>,

    /// Log file path (defaults to /tmp/eventdesk-tui.log)
    #[arg(long, default_value = "/tmp/eventdesk-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in raw mode. The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "eventdesk_tui={log_level},eventdesk_core={log_level},eventdesk_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("eventdesk-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

fn token_flag(cli: &Cli) -> Option<SecretString> {
    cli.token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from)
}

/// Build the client configuration.
///
/// Priority: CLI flags > config file profile. A base URL is required from
/// one of them; the token may be missing.
fn build_client_config(cli: &Cli) -> Result<ClientConfig> {
    let cfg = eventdesk_config::load_config_or_default();
    let profile_name = cli
        .profile
        .clone()
        .unwrap_or_else(|| cfg.active_profile_name().to_owned());

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut profile = profile.clone();
        if let Some(ref url) = cli.base_url {
            profile.base_url.clone_from(url);
        }
        if cli.insecure {
            profile.insecure = Some(true);
        }
        if let Some(timeout) = cli.timeout {
            profile.timeout = Some(timeout);
        }
        let token = token_flag(cli)
            .or_else(|| eventdesk_config::resolve_token(&profile, &profile_name));
        return eventdesk_config::profile_to_client_config(&profile, &cfg.defaults, token)
            .wrap_err_with(|| format!("invalid profile '{profile_name}'"));
    }

    if cli.profile.is_some() {
        return Err(eyre!("profile '{profile_name}' not found in configuration"));
    }

    let raw = cli.base_url.as_deref().ok_or_else(|| {
        eyre!(
            "No backend configured. Pass --base-url or run `eventdesk config init` \
             (expected config at {}).",
            eventdesk_config::config_path().display()
        )
    })?;
    let url = eventdesk_config::parse_base_url(raw)?;

    let mut config = ClientConfig::new(url);
    config.timeout = Duration::from_secs(cli.timeout.unwrap_or(cfg.defaults.timeout));
    if cli.insecure || cfg.defaults.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(token) = token_flag(cli) {
        config = config.with_token(BearerToken::from(token));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let client_config = build_client_config(&cli)?;
    info!(
        base_url = %client_config.base_url,
        has_token = client_config.token.is_some(),
        "starting eventdesk-tui"
    );

    let session = Session::new(client_config)?;
    let initial_event = cli.event.as_deref().and_then(EventId::parse);
    let mut app = App::new(session, initial_event);
    app.run().await?;

    Ok(())
}
