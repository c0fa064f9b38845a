//! Session configuration for gradepost
//!
//! There is no ambient per-process API session: every service-facing
//! constructor takes an explicit `SessionConfig` value. Configuration is
//! stored in `gradepost/config.toml` under the platform config directory,
//! with `GRADEPOST_*` environment variable overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GradepostError, Result};

/// Default base URL for the grading service API
pub const DEFAULT_API_URL: &str = "https://api.codepost.io";

/// Default directory prefix that marks course directories
pub const DEFAULT_COURSE_PREFIX: &str = "CS";

/// Per-session configuration for the grading service and local conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// API token for the grading service
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the grading service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Course period used to disambiguate course lookups (e.g. "Spring 2020")
    #[serde(default)]
    pub period: Option<String>,

    /// Directory prefix for course names (e.g. CS for CS160)
    #[serde(default = "default_course_prefix")]
    pub course_prefix: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_course_prefix() -> String {
    DEFAULT_COURSE_PREFIX.to_string()
}

impl SessionConfig {
    /// Load configuration from an explicit path, or from the default
    /// location (`<config dir>/gradepost/config.toml`).
    ///
    /// `GRADEPOST_API_KEY` and `GRADEPOST_PERIOD` override file values.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Err(GradepostError::ConfigNotFound { path });
        }

        let content = fs::read_to_string(&path)?;
        let mut config: SessionConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        tracing::debug!(path = ?path, period = ?config.period, "loaded session config");
        Ok(config)
    }

    /// Default config file location under the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("gradepost").join("config.toml"))
            .ok_or_else(|| GradepostError::InvalidConfig {
                reason: "no config directory available on this platform".to_string(),
            })
    }

    /// Build a config directly from an API key, for tests and scripting
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        SessionConfig {
            api_key: api_key.into(),
            api_url: default_api_url(),
            period: None,
            course_prefix: default_course_prefix(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("GRADEPOST_API_KEY") {
            if !key.is_empty() {
                self.api_key = key;
            }
        }
        if let Ok(period) = env::var("GRADEPOST_PERIOD") {
            if !period.is_empty() {
                self.period = Some(period);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(GradepostError::InvalidConfig {
                reason: "api_key is empty (set it in the config file or GRADEPOST_API_KEY)"
                    .to_string(),
            });
        }
        Ok(())
    }
}
