//! Persisted mail settings: the operator-editable document that controls
//! whether and how reminder mail goes out.
//!
//! Settings live in a flat JSON file so they can be edited by hand or through
//! the gateway's settings endpoints without a restart. The in-process view is
//! a [`SharedMailSettings`] cell owned by whoever builds the application
//! state; there is no global.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

fn default_smtp_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

/// SMTP relay coordinates plus the master enable switch.
///
/// Every field has a default, so a partial document (or none at all) loads
/// cleanly. The defaults ship with `notification_enabled: false`: a fresh
/// install never sends mail until an operator opts in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailSettings {
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_password: String,
    #[serde(default)]
    pub notification_enabled: bool,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            sender_email: String::new(),
            sender_password: String::new(),
            notification_enabled: false,
        }
    }
}

/// Loads and saves the mail settings document at a fixed path.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings document, creating it with defaults when missing.
    ///
    /// Writing the defaults back on first load gives operators a concrete
    /// file to edit instead of a phantom default they have to guess at.
    pub fn load(&self) -> Result<MailSettings> {
        if self.path.exists() {
            let raw = fs::read_to_string(&self.path)?;
            let settings = serde_json::from_str(&raw)?;
            debug!(path = %self.path.display(), "loaded mail settings");
            Ok(settings)
        } else {
            let settings = MailSettings::default();
            self.save(&settings)?;
            info!(
                path = %self.path.display(),
                "mail settings document created with defaults"
            );
            Ok(settings)
        }
    }

    /// Persist `settings`, creating parent directories as needed.
    pub fn save(&self, settings: &MailSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "saved mail settings");
        Ok(())
    }
}

/// Cloneable handle to the live mail settings.
///
/// Reads take a snapshot; writers replace the whole value. Updates through
/// one handle are visible to every clone, which is how a settings PUT on the
/// gateway reaches the next check cycle without a restart.
#[derive(Clone)]
pub struct SharedMailSettings {
    inner: Arc<RwLock<MailSettings>>,
}

impl SharedMailSettings {
    pub fn new(settings: MailSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Current settings by value.
    pub fn snapshot(&self) -> MailSettings {
        self.inner.read().unwrap().clone()
    }

    /// Swap in a new settings value.
    pub fn replace(&self, settings: MailSettings) {
        *self.inner.write().unwrap() = settings;
    }

    /// Persist `settings` through `store`, then publish it to the cell.
    ///
    /// Both steps run under the cell's write lock, so concurrent updates
    /// serialize and the document on disk always matches the last published
    /// value. A failed write leaves the live value unchanged.
    pub fn replace_and_save(&self, settings: MailSettings, store: &SettingsStore) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        store.save(&settings)?;
        *guard = settings;
        Ok(())
    }
}
