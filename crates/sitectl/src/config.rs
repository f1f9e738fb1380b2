//! CLI-owned configuration: TOML profiles, credential resolution, and
//! translation to a `MetabaseClient` connection.
//!
//! Core never sees these types -- it receives a pre-built client.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use sitectl_core::{Credentials, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

/// CLI-owned TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named connection profiles.
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

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
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
    30
}

/// CLI-owned profile definition.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Metabase admin service URL (e.g., "https://deploy-host:8172").
    pub server: String,

    /// Managed machine name.
    #[serde(default = "default_machine")]
    pub machine: String,

    /// Username for basic auth. Leave unset for unauthenticated services.
    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Profile {
    /// An empty profile, as created by `config set` on a fresh config.
    pub fn empty() -> Self {
        Self {
            server: String::new(),
            machine: default_machine(),
            username: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_machine() -> String {
    "localhost".into()
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "sitectl", "sitectl")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sitectl");
    p
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SITECTL_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// A fully resolved connection: everything needed to build a client.
#[derive(Debug)]
pub struct Connection {
    pub url: url::Url,
    pub machine: String,
    pub credentials: Option<Credentials>,
    pub transport: TransportConfig,
}

/// Translate a CLI `Profile` + global flags into a [`Connection`].
///
/// This is the single boundary where CLI config types cross into api types.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<Connection, CliError> {
    // 1. Service URL (flag > env > profile)
    let url_str = global.server.as_deref().unwrap_or(&profile.server);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Credentials (absent username means an unauthenticated service)
    let credentials = resolve_credentials(profile, profile_name)?;

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    // 4. Machine (flag > env > profile)
    let machine = global
        .machine
        .as_deref()
        .unwrap_or(&profile.machine)
        .to_owned();

    // 5. Timeout
    let timeout = Duration::from_secs(global.timeout);

    Ok(Connection {
        url,
        machine,
        credentials,
        transport: TransportConfig { tls, timeout },
    })
}

/// Build a [`Connection`] from CLI flags / env vars alone (no profile).
pub fn resolve_flags_only(global: &GlobalOpts) -> Result<Connection, CliError> {
    let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let credentials = env_credentials();

    let tls = if global.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    Ok(Connection {
        url,
        machine: global.machine.clone().unwrap_or_else(default_machine),
        credentials,
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(global.timeout),
        },
    })
}

// ── Credential helpers ───────────────────────────────────────────────

/// Credentials straight from the environment, if both halves are present.
fn env_credentials() -> Option<Credentials> {
    let username = std::env::var("SITECTL_USERNAME").ok()?;
    let password = std::env::var("SITECTL_PASSWORD").ok()?;
    Some(Credentials {
        username,
        password: SecretString::from(password),
    })
}

/// Resolve credentials for a profile from the credential chain.
///
/// A profile without a username targets an unauthenticated service and
/// resolves to `None`. With a username, the password comes from
/// env var > keyring > plaintext config, in that order.
fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<Credentials>, CliError> {
    let username = match profile
        .username
        .clone()
        .or_else(|| std::env::var("SITECTL_USERNAME").ok())
    {
        Some(u) => u,
        None => return Ok(None),
    };

    // 1. Env var
    if let Ok(pw) = std::env::var("SITECTL_PASSWORD") {
        return Ok(Some(Credentials {
            username,
            password: SecretString::from(pw),
        }));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new("sitectl", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(Some(Credentials {
                username,
                password: SecretString::from(pw),
            }));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(Some(Credentials {
            username,
            password: SecretString::from(pw.clone()),
        }));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_machine_defaults_to_localhost() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[profiles.lab]
server = "https://deploy-host:8172"
"#,
        )
        .expect("write config");

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path));
        let cfg: Config = figment.extract().expect("extract config");

        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        assert_eq!(cfg.profiles["lab"].machine, "localhost");
        assert_eq!(cfg.profiles["lab"].server, "https://deploy-host:8172");
    }

    #[test]
    fn defaults_fill_in_when_absent() {
        let cfg = Config::default();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(!cfg.defaults.insecure);
    }
}
