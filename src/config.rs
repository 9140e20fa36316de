use crate::error::{GigError, GigResult};
use crate::voice::ReferenceLists;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Meta
    pub log_level: String,

    // Matching
    /// Similarity cutoff (0.0 - 1.0) for resolving spoken tokens to list entries
    pub match_cutoff: f64,

    // Voice
    pub voice_corrections: HashMap<String, String>,
    pub reference_lists: ReferenceLists,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            match_cutoff: crate::utils::fuzzy::DEFAULT_CUTOFF,
            voice_corrections: HashMap::from([
                ("door dash".to_string(), "DoorDash".to_string()),
                ("uber eats".to_string(), "Uber Eats".to_string()),
                ("grub hub".to_string(), "Grubhub".to_string()),
                ("insta cart".to_string(), "Instacart".to_string()),
            ]),
            reference_lists: ReferenceLists::default(),
        }
    }
}

impl Config {
    /// Load config from `path`.
    ///
    /// A corrupt file is moved aside to `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> GigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> GigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> GigResult<()> {
        if !(0.0..=1.0).contains(&self.match_cutoff) {
            return Err(GigError::Config(format!(
                "match_cutoff must be between 0 and 1, got {}",
                self.match_cutoff
            )));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("giglog")
        .join("config.json")
}
