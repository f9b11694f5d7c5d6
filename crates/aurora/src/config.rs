//! CLI configuration: a thin wrapper around `aurora_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use aurora_core::{ClientConfig, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use aurora_config::{
    Config, Defaults, Profile, ProfileUser, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// List profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build the client config and session from the config file, profile and
/// CLI overrides (flag > env > profile).
pub fn resolve_client(global: &GlobalOpts) -> Result<(ClientConfig, Session), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let stored = cfg.profiles.get(&profile_name).cloned();
    if stored.is_none() && global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    // Without a stored profile, flags and env alone describe the backend.
    let api_url = match (&global.api_url, &stored) {
        (Some(url), _) => url.clone(),
        (None, Some(profile)) => profile.api_url.clone(),
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    let profile = Profile {
        api_url,
        ..stored.clone().unwrap_or_default()
    };

    let mut client = aurora_config::profile_to_client_config(&profile)?;
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);
    if timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    client.timeout = Duration::from_secs(timeout);

    let mut session = match (&global.token, &stored) {
        (Some(token), _) => Session::with_token(SecretString::from(token.clone())),
        (None, Some(stored)) => aurora_config::profile_to_session(stored, &profile_name),
        (None, None) => Session::anonymous(),
    };
    if let (Some(user), None) = (profile.user.as_ref(), session.user()) {
        session = session.with_user(user.into());
    }

    Ok((client, session))
}
