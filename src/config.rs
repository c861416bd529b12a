//! Configuration file for the command-line calculator.
//!
//! Read from `<config_dir>/rpncalc/config.toml` unless another path is given.
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_PROMPT: &str = "Enter an arithmetic expression (or type 'exit' to quit): ";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Print the postfix notation before each result.
    pub show_postfix: bool,
    /// Decimal places used when displaying non-integral results.
    pub precision: Option<usize>,
    /// Prompt shown by the interactive loop.
    pub prompt: String,
    /// Copy every successful result to the clipboard.
    pub copy_results: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_postfix: true,
            precision: None,
            prompt: DEFAULT_PROMPT.to_string(),
            copy_results: false,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. The default path may be absent, in which
    /// case defaults are used.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_path() {
                Some(p) => (p, false),
                None => {
                    warn!("no config directory available, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

/// Default location of the configuration file.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rpncalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("precision = 3\nshow_postfix = false\n").unwrap();
        assert_eq!(config.precision, Some(3));
        assert!(!config.show_postfix);
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert!(!config.copy_results);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Config::from_toml("precision = \"three\"").is_err());
        assert!(Config::from_toml("colour = true").is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = std::env::temp_dir()
            .join(format!("rpncalc-missing-config-{}.toml", std::process::id()));
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rpncalc-config-{}.toml", std::process::id()));
        fs::write(&path, "prompt = \"> \"\ncopy_results = true\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.prompt, "> ");
        assert!(config.copy_results);
        assert!(config.show_postfix);
    }
}
