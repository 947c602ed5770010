//! Configuration loading and management
//!
//! Handles parsing of `.sprintboard.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rank::DEFAULT_TOP_LIMIT;

pub const CONFIG_FILE_NAME: &str = ".sprintboard.toml";

const MAX_TOP_LIMIT: usize = 1000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Watch configuration
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Report-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Tasks kept per user in the top-task report
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
}

fn default_top_limit() -> usize {
    DEFAULT_TOP_LIMIT
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_limit: default_top_limit(),
        }
    }
}

/// Watch-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Quiet period after the last change before recomputing
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a `.sprintboard.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults when absent
    pub fn load_from_dir(dir: &Path) -> crate::error::Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the effective configuration: an explicit path must exist,
    /// otherwise the working directory is consulted.
    pub fn resolve(explicit: Option<&Path>) -> crate::error::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                Self::load_from_dir(&cwd)
            }
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.report.top_limit == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "report.top_limit must be > 0".to_string(),
            ));
        }
        if self.report.top_limit > MAX_TOP_LIMIT {
            return Err(crate::error::Error::InvalidConfig(format!(
                "report.top_limit must be <= {MAX_TOP_LIMIT}"
            )));
        }
        if self.watch.debounce_ms == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "watch.debounce_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.report.top_limit, 10);
        assert_eq!(cfg.watch.debounce_ms, 200);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let content = r#"
[report]
top_limit = 3

[watch]
debounce_ms = 50
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.report.top_limit, 3);
        assert_eq!(cfg.watch.debounce_ms, 50);
    }

    #[test]
    fn invalid_top_limit_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[report]\ntop_limit = 0").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            crate::error::Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path()).expect("defaults");
        assert_eq!(cfg.report.top_limit, 10);
    }

    #[test]
    fn load_from_dir_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[watch]\ndebounce_ms = 1000")
            .expect("write config");

        let cfg = Config::load_from_dir(dir.path()).expect("config");
        assert_eq!(cfg.watch.debounce_ms, 1000);
        assert_eq!(cfg.report.top_limit, 10);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let err = Config::resolve(Some(missing.as_path())).expect_err("missing");
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
