//! Process configuration for the chime gateway.
//!
//! Layered figment: baked-in defaults, then a TOML file, then `CHIME_*`
//! environment variables. Example:
//!
//! ```toml
//! [gateway]
//! bind = "0.0.0.0"
//! port = 8420
//!
//! [reminders]
//! lookahead_hours = 24
//! send_timeout_ms = 10000
//! send_retries = 1
//!
//! [mail]
//! settings_path = "/var/lib/chime/mail.json"
//! ```
//!
//! `CHIME_GATEWAY_PORT=9000` overrides `[gateway] port`, and so on.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{ChimeError, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8420;
pub const DEFAULT_LOOKAHEAD_HOURS: i64 = 24;
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 10_000;

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_lookahead_hours() -> i64 {
    DEFAULT_LOOKAHEAD_HOURS
}

fn default_send_timeout_ms() -> u64 {
    DEFAULT_SEND_TIMEOUT_MS
}

fn default_settings_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.chime/mail.json", home)
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.chime/chime.toml", home)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    /// Default due window, in hours, when a check request does not name one.
    #[serde(default = "default_lookahead_hours")]
    pub lookahead_hours: i64,
    /// Upper bound on a single SMTP send attempt.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
    /// Extra attempts after a transport failure or timeout. Zero means one
    /// attempt total.
    #[serde(default)]
    pub send_retries: u32,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            lookahead_hours: default_lookahead_hours(),
            send_timeout_ms: default_send_timeout_ms(),
            send_retries: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailStoreConfig {
    /// Location of the persisted mail settings document.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for MailStoreConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}

/// Root configuration, one section per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChimeConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub mail: MailStoreConfig,
}

impl ChimeConfig {
    /// Load configuration from `config_path` (or the default location) with
    /// `CHIME_*` environment variables layered on top. A missing file is not
    /// an error; the figment simply yields the defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(str::to_string)
            .unwrap_or_else(default_config_path);

        Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CHIME_").split("_"))
            .extract()
            .map_err(|e| ChimeError::Config(e.to_string()))
    }
}
