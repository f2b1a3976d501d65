//! Tutormind configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main tutormind configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutormindConfig {
    /// Memory store configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Upstream text-generation configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl TutormindConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Memory store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Directory holding the persisted snapshot
    pub storage_dir: PathBuf,

    /// Key the snapshot is stored under
    pub storage_key: String,

    /// Proficiency assigned to a topic on first mention
    pub seed_proficiency: u8,

    /// Proficiency delta applied on each subsequent mention
    pub default_delta: i32,

    /// Number of trailing messages included in a context summary
    pub summary_message_limit: usize,

    /// Number of trailing resources included in a context summary
    pub summary_resource_limit: usize,
}

impl MemoryConfig {
    /// Default storage directory (~/.tutormind/)
    pub fn default_dir() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tutormind")
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            storage_dir: Self::default_dir(),
            storage_key: "ai-tutor-memory".to_string(),
            seed_proficiency: 10,
            default_delta: 5,
            summary_message_limit: 10,
            summary_resource_limit: 5,
        }
    }
}

/// Upstream text-generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the generative API
    pub api_base: String,

    /// Model identifier appended to the base URL
    pub model: String,

    /// Environment variable holding the API credential
    pub credential_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Top-k sampling cutoff
    pub top_k: u32,

    /// Top-p sampling cutoff
    pub top_p: f32,

    /// Maximum tokens in a generated reply
    pub max_output_tokens: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
            credential_env: "TUTORMIND_API_KEY".to_string(),
            timeout_secs: 30,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TutormindConfig::default();
        assert_eq!(config.memory.storage_key, "ai-tutor-memory");
        assert_eq!(config.memory.seed_proficiency, 10);
        assert_eq!(config.memory.default_delta, 5);
        assert_eq!(config.upstream.max_output_tokens, 1024);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tutormind.toml");
        std::fs::write(
            &path,
            r#"
[memory]
storage_dir = "/tmp/tutormind"
storage_key = "test-memory"
seed_proficiency = 20
default_delta = 10
summary_message_limit = 4
summary_resource_limit = 2

[upstream]
api_base = "http://localhost:9999"
model = "test-model"
credential_env = "TEST_KEY"
timeout_secs = 5
temperature = 0.5
top_k = 10
top_p = 0.9
max_output_tokens = 128
"#,
        )
        .unwrap();

        let config = TutormindConfig::load(&path).unwrap();
        assert_eq!(config.memory.storage_key, "test-memory");
        assert_eq!(config.memory.seed_proficiency, 20);
        assert_eq!(config.upstream.model, "test-model");
    }

    #[test]
    fn test_load_missing_file() {
        let result = TutormindConfig::load(std::path::Path::new("/nonexistent/tutormind.toml"));
        assert!(result.is_err());
    }
}
