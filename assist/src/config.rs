use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::types::PlanTier;

const MIB: u64 = 1024 * 1024;

/// Tunables for the assistant. Every field has a default so a partial (or
/// missing) `config.toml` is fine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistConfig {
    pub free_interactions: u32,
    pub max_suggestions: usize,
    pub debounce_ms: u64,
    pub insert_highlight_ms: u64,
    pub focus_highlight_ms: u64,
    pub focus_window: usize,
    pub inline_radius: usize,
    pub inline_limit: usize,
    pub free_upload_limit_bytes: u64,
    pub premium_upload_limit_bytes: u64,
    pub storage_key: String,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            free_interactions: 5,
            max_suggestions: 5,
            debounce_ms: 500,
            insert_highlight_ms: 2000,
            focus_highlight_ms: 3000,
            focus_window: 50,
            inline_radius: 50,
            inline_limit: 3,
            free_upload_limit_bytes: 5 * MIB,
            premium_upload_limit_bytes: 50 * MIB,
            storage_key: "freemium-data".to_string(),
        }
    }
}

impl AssistConfig {
    /// Load `<home>/config.toml`, falling back to defaults when absent.
    pub fn load(home: &Path) -> Result<Self> {
        let path = home.join("config.toml");
        let data = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let cfg = toml::from_str(&data)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn insert_highlight(&self) -> Duration {
        Duration::from_millis(self.insert_highlight_ms)
    }

    pub fn focus_highlight(&self) -> Duration {
        Duration::from_millis(self.focus_highlight_ms)
    }

    pub fn upload_limit(&self, tier: PlanTier) -> u64 {
        match tier {
            PlanTier::Free => self.free_upload_limit_bytes,
            PlanTier::Premium => self.premium_upload_limit_bytes,
        }
    }
}

/// Data directory: `SCHOLAR_HOME` if set, else `~/.scholar`.
pub fn home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SCHOLAR_HOME")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".scholar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AssistConfig::load(dir.path()).unwrap();
        assert_eq!(cfg, AssistConfig::default());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "free_interactions = 10\ndebounce_ms = 750\n",
        )
        .unwrap();
        let cfg = AssistConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.free_interactions, 10);
        assert_eq!(cfg.debounce(), Duration::from_millis(750));
        assert_eq!(cfg.max_suggestions, 5);
        assert_eq!(cfg.storage_key, "freemium-data");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "free_interactions = \"lots\"").unwrap();
        let err = AssistConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn upload_limit_depends_on_tier() {
        let cfg = AssistConfig::default();
        assert_eq!(cfg.upload_limit(PlanTier::Free), 5 * MIB);
        assert_eq!(cfg.upload_limit(PlanTier::Premium), 50 * MIB);
    }
}
