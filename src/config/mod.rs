use crate::core::{DepinjError, DepinjResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Whether substitutions are applied at all
    ///
    /// When false, `lookup` and `construct` always reach the real reference.
    /// Registrations are still recorded.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log a warning when a registration replaces an existing substitution
    #[serde(default = "default_true")]
    pub warn_on_replace: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            warn_on_replace: true,
        }
    }
}

impl RegistryConfig {
    /// Parse a config from YAML; an empty document yields the defaults
    pub fn from_yaml_str(content: &str) -> DepinjResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| DepinjError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load config from a YAML file
    pub fn load_from(path: &Path) -> DepinjResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load config from a YAML file, falling back to defaults if it doesn't exist
    pub fn load_or_default(path: &Path) -> DepinjResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no registry config, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    /// Save config as YAML, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> DepinjResult<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
