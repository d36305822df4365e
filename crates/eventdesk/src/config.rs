//! CLI configuration: thin wrapper around `eventdesk_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--base-url, --token, etc.).

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::warn;

use eventdesk_core::{BearerToken, ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use eventdesk_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config, store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Comma-separated profile names, for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// Flag overrides take priority over profile values. Without a profile,
/// `--base-url` alone is enough.
pub fn build_client_config(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, &cfg.defaults);
    }

    // An explicitly named profile must exist
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    let raw = global.base_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = eventdesk_config::parse_base_url(raw)?;

    let mut config = ClientConfig::new(url);
    config.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    if global.insecure || cfg.defaults.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(token) = token_flag(global) {
        config = config.with_token(BearerToken::from(token));
    }
    Ok(config)
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<ClientConfig, CliError> {
    // 1. Base URL (flag > env > profile)
    let mut profile = profile.clone();
    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }

    // 2. Token (flag > token_env > keyring > plaintext)
    let token = token_flag(global)
        .or_else(|| eventdesk_config::resolve_token(&profile, profile_name));

    // 3. TLS and timeout (flag > profile > [defaults])
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    Ok(eventdesk_config::profile_to_client_config(
        &profile, defaults, token,
    )?)
}

/// Fill `--output` and `--color` from `[defaults]` when neither flag nor
/// env var set them. Unknown values are logged and ignored.
pub fn apply_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = parse_default("output", &defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_default("color", &defaults.color);
    }
}

fn parse_default<T: ValueEnum>(key: &str, raw: &str) -> Option<T> {
    let parsed = T::from_str(raw, true).ok();
    if parsed.is_none() {
        warn!(key, value = raw, "ignoring unknown value in config [defaults]");
    }
    parsed
}

fn token_flag(global: &GlobalOpts) -> Option<SecretString> {
    global
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, ColorMode, OutputFormat};

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["eventdesk"];
        argv.extend_from_slice(args);
        argv.push("stats");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_timeout(timeout: u64, profile_timeout: Option<u64>) -> Config {
        let profile = Profile {
            base_url: "https://events.example.com/api".into(),
            timeout: profile_timeout,
            ..Profile::default()
        };
        Config {
            defaults: Defaults {
                timeout,
                ..Defaults::default()
            },
            profiles: [("default".to_owned(), profile)].into(),
            ..Config::default()
        }
    }

    #[test]
    fn defaults_timeout_applies_without_flag() {
        let cfg = config_with_timeout(90, None);
        let client = build_client_config(&global(&[]), &cfg).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(90));
    }

    #[test]
    fn defaults_timeout_applies_without_profile() {
        let cfg = Config {
            defaults: Defaults {
                timeout: 90,
                ..Defaults::default()
            },
            ..Config::default()
        };
        let opts = global(&["--base-url", "https://events.example.com/api"]);
        let client = build_client_config(&opts, &cfg).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(90));
    }

    #[test]
    fn timeout_flag_beats_profile_and_defaults() {
        let cfg = config_with_timeout(90, Some(45));
        assert_eq!(
            build_client_config(&global(&[]), &cfg).unwrap().timeout,
            Duration::from_secs(45)
        );
        assert_eq!(
            build_client_config(&global(&["--timeout", "5"]), &cfg)
                .unwrap()
                .timeout,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn output_and_color_fall_back_to_config_defaults() {
        let defaults = Defaults {
            output: "json-compact".into(),
            color: "never".into(),
            ..Defaults::default()
        };

        let mut opts = global(&[]);
        apply_defaults(&mut opts, &defaults);
        assert_eq!(opts.output(), OutputFormat::JsonCompact);
        assert_eq!(opts.color(), ColorMode::Never);

        let mut opts = global(&["-o", "yaml", "--color", "always"]);
        apply_defaults(&mut opts, &defaults);
        assert_eq!(opts.output(), OutputFormat::Yaml);
        assert_eq!(opts.color(), ColorMode::Always);
    }

    #[test]
    fn unknown_default_is_ignored() {
        let defaults = Defaults {
            output: "xml".into(),
            ..Defaults::default()
        };
        let mut opts = global(&[]);
        apply_defaults(&mut opts, &defaults);
        assert_eq!(opts.output(), OutputFormat::Table);
    }
}
