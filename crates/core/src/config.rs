//! Actor configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScreenplayError};

/// Configuration shared by the actors of a test run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenplayConfig {
    /// Deepest task nesting an actor will expand before giving up
    pub max_task_depth: usize,

    /// Step narration
    pub narration: NarrationConfig,
}

impl ScreenplayConfig {
    pub const DEFAULT_MAX_TASK_DEPTH: usize = 32;

    /// Highest nesting limit accepted; expansion recurses once per level
    pub const MAX_TASK_DEPTH_CEILING: usize = 256;

    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings no actor could run with
    pub fn validate(&self) -> Result<()> {
        if self.max_task_depth == 0 {
            return Err(ScreenplayError::InvalidConfig(
                "max_task_depth must be at least 1".to_string(),
            ));
        }
        if self.max_task_depth > Self::MAX_TASK_DEPTH_CEILING {
            return Err(ScreenplayError::InvalidConfig(format!(
                "max_task_depth must be at most {}, got {}",
                Self::MAX_TASK_DEPTH_CEILING,
                self.max_task_depth
            )));
        }
        Ok(())
    }

    /// Builder-style override of the nesting limit
    pub fn with_max_task_depth(mut self, depth: usize) -> Self {
        self.max_task_depth = depth;
        self
    }
}

impl Default for ScreenplayConfig {
    fn default() -> Self {
        Self {
            max_task_depth: Self::DEFAULT_MAX_TASK_DEPTH,
            narration: NarrationConfig::default(),
        }
    }
}

/// Narration configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Call narrators at all
    pub enabled: bool,

    /// Also narrate questions, not just interactions and tasks
    pub record_questions: bool,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            record_questions: true,
        }
    }
}
