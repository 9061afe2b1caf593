// ── Vaani Atoms: Configuration ─────────────────────────────────────────────
// Runtime configuration for the pipeline, deserializable from a TOML file.
// Every field has a sensible default so an empty (or absent) file works.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::constants::*;
use super::error::{AssistantError, AssistantResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the remote inference service (`/query` and `/health`).
    pub endpoint: String,
    /// TCP connect timeout for remote calls, in seconds.
    pub connect_timeout_secs: u64,
    /// Full-response timeout for remote calls, in seconds.
    pub response_timeout_secs: u64,
    /// FIFO bound on the persisted conversation log.
    pub memory_capacity: usize,
    /// Recent turns included as context in remote requests.
    pub context_turns: usize,
    /// Prefixed to bare 10-digit numbers when saving contacts.
    pub country_code: String,
    /// Database file override; defaults to the platform data dir.
    pub db_path: Option<PathBuf>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            response_timeout_secs: DEFAULT_RESPONSE_TIMEOUT_SECS,
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            context_turns: DEFAULT_CONTEXT_TURNS,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            db_path: None,
        }
    }
}

impl AssistantConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> AssistantResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| AssistantError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the database path: explicit override, else the platform
    /// data dir (`~/.local/share/vaani/vaani.db` on Linux).
    pub fn resolve_db_path(&self) -> PathBuf {
        if let Some(p) = &self.db_path {
            return p.clone();
        }
        dirs::data_dir().unwrap_or_default().join("vaani").join("vaani.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: AssistantConfig = toml::from_str("endpoint = \"http://10.0.0.5:8000\"").unwrap();
        assert_eq!(cfg.endpoint, "http://10.0.0.5:8000");
        assert_eq!(cfg.memory_capacity, DEFAULT_MEMORY_CAPACITY);
        assert_eq!(cfg.response_timeout_secs, DEFAULT_RESPONSE_TIMEOUT_SECS);
        assert_eq!(cfg.country_code, "+91");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: AssistantConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.context_turns, 5);
    }
}
