//! Configuration structures and loading logic.

use crate::config::modes::TimeZoneMode;
use crate::error::{Error, Result};
use crate::mailbox::DEFAULT_BATCH_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "attachment-filer.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mailbox: MailboxConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Where flagged messages are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailboxConfig {
    /// Root of the Maildir tree.
    #[serde(default)]
    pub maildir: Option<PathBuf>,

    /// Label whose hierarchy is scanned.
    #[serde(default = "default_root_label")]
    pub root_label: String,

    /// Threads fetched per page (1 to 500).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            maildir: None,
            root_label: default_root_label(),
            batch_size: default_batch_size(),
        }
    }
}

/// Where attachments are filed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory destination paths are resolved from.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Destination path template.
    #[serde(default = "default_path_template")]
    pub path_template: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: None,
            path_template: default_path_template(),
        }
    }
}

/// Run options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Zone dates are rendered in.
    #[serde(default)]
    pub timezone: TimeZoneMode,

    /// Log destinations without writing files or clearing flags.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_root_label() -> String {
    "Finances".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_path_template() -> String {
    "Finances/Documents/$y/$m/$sublabel/$y$m$d-$domain--$mc-$ac.$ext".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the configuration file to use.
    ///
    /// An explicit path always wins. Otherwise the working directory is tried,
    /// then the platform configuration directory.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("", "", "attachment-filer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.exists())
    }
}
