//! Shared configuration for the Aurora CLI.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), and
//! translation to `aurora_core::ClientConfig` / `aurora_core::Session`.
//! The CLI adds flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aurora_core::{ClientConfig, Session, TlsVerification, User};

/// Keyring service name; entries are keyed `{profile}/token`.
pub const KEYRING_SERVICE: &str = "aurora";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    15
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    /// Backend base URL (e.g. "https://book.aurora-voyages.com").
    pub api_url: String,

    /// Publishable key of the card-payment provider.
    pub payment_public_key: Option<String>,

    /// Session token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the session token.
    pub token_env: Option<String>,

    /// Signed-in customer; pre-fills the lead traveler.
    pub user: Option<ProfileUser>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProfileUser {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&ProfileUser> for User {
    fn from(u: &ProfileUser) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

impl Config {
    /// Name of the profile to use when none is given explicitly.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "aurora", "aurora").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("aurora");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` layered over defaults, then `AURORA_` env
/// (nested keys separated by `__`, e.g. `AURORA_DEFAULTS__OUTPUT`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AURORA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the session token: `token_env` → system keyring → plaintext.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a token in the system keyring for `profile_name`.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))?;
    entry.set_password(token)?;
    Ok(())
}

/// Build a `ClientConfig` from a profile; no CLI flag overrides.
pub fn profile_to_client_config(profile: &Profile) -> Result<ClientConfig, ConfigError> {
    let url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let mut config = ClientConfig::new(url);
    if let Some(ref ca_path) = profile.ca_cert {
        config.tls = TlsVerification::CustomCa(ca_path.clone());
    }
    if let Some(secs) = profile.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    config.payment_public_key.clone_from(&profile.payment_public_key);
    Ok(config)
}

/// Build the session for a profile. A missing token yields an anonymous
/// session (catalog lookups still work).
pub fn profile_to_session(profile: &Profile, profile_name: &str) -> Session {
    let mut session = match resolve_token(profile, profile_name) {
        Ok(token) => Session::with_token(token),
        Err(_) => Session::anonymous(),
    };
    if let Some(ref user) = profile.user {
        session = session.with_user(User::from(user));
    }
    session
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    const SAMPLE: &str = r#"
default_profile = "staging"

[defaults]
output = "json"

[profiles.staging]
api_url = "https://staging.aurora-voyages.test"
payment_public_key = "pk_test_123"
token = "plain-token"
timeout = 5

[profiles.staging.user]
id = "u-1"
name = "Ada Lovelace"
email = "ada@example.com"
"#;

    // Loading reads `AURORA_` env vars, so every test that loads runs inside
    // a `Jail` to serialize against the env-mutating ones.

    #[test]
    fn loads_profiles_from_toml() {
        figment::Jail::expect_with(|_jail| {
            let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
            let path = dir.path().join("config.toml");
            std::fs::write(&path, SAMPLE).map_err(|e| e.to_string())?;

            let config = load_config_from(&path).map_err(|e| e.to_string())?;

            assert_eq!(config.active_profile_name(), "staging");
            assert_eq!(config.defaults.output, "json");
            assert_eq!(config.defaults.timeout, 15);
            let profile = config.profile("staging").map_err(|e| e.to_string())?;
            assert_eq!(profile.payment_public_key.as_deref(), Some("pk_test_123"));
            assert_eq!(profile.user.as_ref().unwrap().name, "Ada Lovelace");
            assert!(matches!(
                config.profile("prod"),
                Err(ConfigError::ProfileNotFound { .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        figment::Jail::expect_with(|jail| {
            let config = load_config_from(&jail.directory().join("absent.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.active_profile_name(), "default");
            assert!(config.profiles.is_empty());
            assert_eq!(config.defaults.output, "table");
            Ok(())
        });
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        figment::Jail::expect_with(|_jail| {
            let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
            let path = dir.path().join("nested").join("config.toml");
            let mut config = Config::default();
            config.profiles.insert(
                "default".into(),
                Profile {
                    api_url: "http://localhost:5000".into(),
                    token_env: Some("AURORA_TEST_TOKEN".into()),
                    ..Profile::default()
                },
            );

            save_config_to(&config, &path).map_err(|e| e.to_string())?;
            let loaded = load_config_from(&path).map_err(|e| e.to_string())?;

            assert_eq!(loaded.profiles["default"], config.profiles["default"]);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("AURORA_DEFAULTS__OUTPUT", "yaml");
            jail.set_env("AURORA_DEFAULT_PROFILE", "default");

            let config = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.defaults.output, "yaml");
            assert_eq!(config.active_profile_name(), "default");
            Ok(())
        });
    }

    #[test]
    fn token_env_wins_over_plaintext() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AURORA_TEST_TOKEN", "from-env");
            let profile = Profile {
                api_url: "http://localhost:5000".into(),
                token: Some("plain".into()),
                token_env: Some("AURORA_TEST_TOKEN".into()),
                ..Profile::default()
            };
            let token = resolve_token(&profile, "jail-test").map_err(|e| e.to_string())?;
            assert_eq!(token.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn profile_translates_to_client_config_and_session() {
        let profile = Profile {
            api_url: "https://book.aurora-voyages.test".into(),
            payment_public_key: Some("pk_live_1".into()),
            token: Some("plain".into()),
            user: Some(ProfileUser {
                id: "u-9".into(),
                name: "Grace Hopper".into(),
                email: "grace@example.com".into(),
            }),
            ca_cert: Some(PathBuf::from("/etc/aurora/ca.pem")),
            timeout: Some(20),
            ..Profile::default()
        };

        let config = profile_to_client_config(&profile).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(
            config.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/aurora/ca.pem"))
        );
        assert_eq!(config.payment_public_key.as_deref(), Some("pk_live_1"));

        let session = profile_to_session(&profile, "unit-test-profile");
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().email, "grace@example.com");
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let profile = Profile {
            api_url: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_config(&profile),
            Err(ConfigError::Validation { .. })
        ));
    }
}
