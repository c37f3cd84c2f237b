use crate::error::{AdvisorError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Integrations the validation adapter knows how to probe.
pub const KNOWN_INTEGRATIONS: &[&str] = &["context7", "mcpref", "semgrep"];

const MAX_SENSIBLE_TIMEOUT_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Upper bound for every external probe, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_integrations")]
    pub integrations: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_integrations() -> Vec<String> {
    KNOWN_INTEGRATIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: default_timeout_secs(),
            integrations: default_integrations(),
        }
    }
}

impl ValidationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// LearningConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// AdvisorConfig (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub learning: LearningConfig,
}

impl AdvisorConfig {
    /// Load `<home>/.stackwise/config.yaml`. A missing file means defaults;
    /// a malformed one is an error.
    pub fn load(home: &Path) -> Result<Self> {
        let path = paths::config_path(home);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: AdvisorConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Check for common mistakes. Errors make the config unusable; warnings
    /// are surfaced but tolerated.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let v = &self.validation;

        if v.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "validation.timeout_secs must be greater than 0".to_string(),
            });
        } else if v.timeout_secs > MAX_SENSIBLE_TIMEOUT_SECS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "validation.timeout_secs is {}s; probes may stall recommendations",
                    v.timeout_secs
                ),
            });
        }

        for name in &v.integrations {
            if !KNOWN_INTEGRATIONS.contains(&name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "unknown integration '{name}' (known: {})",
                        KNOWN_INTEGRATIONS.join(", ")
                    ),
                });
            }
        }

        if v.enabled && v.integrations.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "validation is enabled but no integrations are listed".to_string(),
            });
        }

        warnings
    }

    /// Fail with the first error-level warning, if any.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(AdvisorError::Config(w.message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
