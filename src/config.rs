//! Configuration file handling.
//!
//! This module provides loading and saving of the reporter configuration
//! from a TOML file. Every option is an independent toggle; callers that
//! assemble the configuration themselves (a CLI, for instance) can build a
//! [`Config`] directly instead.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/log4scan/config.toml`
//! - macOS: `~/Library/Application Support/log4scan/config.toml`
//! - Windows: `%APPDATA%\log4scan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! output_mode = "json"
//! color = false
//! suppress_unknown_versions = true
//! suppress_jndi_lookup_only = false
//! disable_cve_2021_45105 = false
//! disable_cve_2021_44832 = true
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checker::{CVE_2021_44832, CVE_2021_45105};
use crate::output::OutputMode;

/// Reporter configuration.
///
/// # Example
///
/// ```
/// use log4scan::{Config, OutputMode};
///
/// let config = Config {
///     output_mode: OutputMode::Json,
///     suppress_unknown_versions: true,
///     ..Config::default()
/// };
///
/// assert!(config.disabled_cves().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How reported files are written.
    ///
    /// Valid values: "human", "json", "path-only"
    /// Default: "human"
    pub output_mode: OutputMode,

    /// Wrap human-readable lines in ANSI colour codes.
    ///
    /// The check looks at stdout. Callers writing reports to a file or pipe
    /// while stdout is a terminal should turn this off.
    ///
    /// Default: true when stdout is a colour-capable terminal and `NO_COLOR`
    /// is unset
    pub color: bool,

    /// Drop files whose log4j version could not be determined.
    ///
    /// Default: false
    pub suppress_unknown_versions: bool,

    /// Drop files flagged only because a `JndiLookup` class was present,
    /// and leave the `JndiLookup` reasons out of every report.
    ///
    /// Default: false
    pub suppress_jndi_lookup_only: bool,

    /// Stop reporting CVE-2021-45105.
    ///
    /// Default: false
    pub disable_cve_2021_45105: bool,

    /// Stop reporting CVE-2021-44832.
    ///
    /// Default: false
    pub disable_cve_2021_44832: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::Human,
            color: default_color(),
            suppress_unknown_versions: false,
            suppress_jndi_lookup_only: false,
            disable_cve_2021_45105: false,
            disable_cve_2021_44832: false,
        }
    }
}

/// Colour is on only for a colour-capable stdout terminal without `NO_COLOR`.
fn default_color() -> bool {
    color_enabled(std::env::var_os("NO_COLOR").is_some(), console::colors_enabled())
}

fn color_enabled(no_color: bool, terminal_colors: bool) -> bool {
    !no_color && terminal_colors
}

impl Config {
    /// CVE identifiers this configuration turns off.
    pub fn disabled_cves(&self) -> Vec<&'static str> {
        let mut disabled = Vec::new();
        if self.disable_cve_2021_45105 {
            disabled.push(CVE_2021_45105);
        }
        if self.disable_cve_2021_44832 {
            disabled.push(CVE_2021_44832);
        }
        disabled
    }

    /// Loads configuration from the default config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Saves the configuration to the default config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// ```
    /// use log4scan::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("log4scan/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("log4scan")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}
