//! Conversational memory store
//!
//! Single source of truth for chat history, uploaded-resource metadata, and
//! topic proficiency. Hydrates synchronously from the durable substrate at
//! construction and writes the full snapshot back after every mutation; read
//! operations never persist.
//!
//! Hydration failures (missing key, corrupt blob, unknown snapshot version)
//! are swallowed with a warning and fall back to empty collections, so
//! construction never fails on bad data. Write failures are surfaced: every
//! mutator returns `Result`, and a failed persist leaves the caller to decide
//! what to do.

use super::storage::{FileStorage, StorageBackend};
use super::types::{LearningTopic, Message, ResourceDraft, UploadedResource};
use crate::config::MemoryConfig;
use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current snapshot schema version.
///
/// Blobs written before versioning carry no field and default here, so legacy
/// snapshots hydrate normally.
const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// The persisted aggregate: all three collections plus a schema version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemorySnapshot {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    uploaded_resources: Vec<UploadedResource>,
    #[serde(default)]
    learning_topics: Vec<LearningTopic>,
}

impl Default for MemorySnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            messages: Vec::new(),
            uploaded_resources: Vec::new(),
            learning_topics: Vec::new(),
        }
    }
}

/// Durable store for conversation memory.
///
/// One instance per session; callers share it through whatever composition
/// root owns it rather than a process-wide singleton.
pub struct MemoryStore {
    backend: Box<dyn StorageBackend>,
    config: MemoryConfig,
    snapshot: MemorySnapshot,
}

impl MemoryStore {
    /// Create a store bound to `backend`, hydrating any snapshot persisted
    /// under the configured key.
    pub fn new(backend: Box<dyn StorageBackend>, config: MemoryConfig) -> Self {
        let snapshot = Self::hydrate(backend.as_ref(), &config.storage_key);
        Self {
            backend,
            config,
            snapshot,
        }
    }

    /// Open a store over a file substrate rooted at the configured
    /// storage directory.
    pub fn open(config: MemoryConfig) -> Result<Self> {
        let backend = FileStorage::new(&config.storage_dir)?;
        Ok(Self::new(Box::new(backend), config))
    }

    fn hydrate(backend: &dyn StorageBackend, key: &str) -> MemorySnapshot {
        let raw = match backend.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return MemorySnapshot::default(),
            Err(e) => {
                tracing::warn!("Failed to read memory snapshot '{}': {}", key, e);
                return MemorySnapshot::default();
            }
        };

        match serde_json::from_str::<MemorySnapshot>(&raw) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot,
            Ok(snapshot) => {
                tracing::warn!(
                    "Memory snapshot '{}' has unknown version {}, starting empty",
                    key,
                    snapshot.version
                );
                MemorySnapshot::default()
            }
            Err(e) => {
                tracing::warn!("Failed to parse memory snapshot '{}': {}", key, e);
                MemorySnapshot::default()
            }
        }
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.snapshot)?;
        self.backend.store(&self.config.storage_key, &raw)?;
        tracing::debug!(
            "Persisted memory snapshot '{}' ({} messages, {} resources, {} topics)",
            self.config.storage_key,
            self.snapshot.messages.len(),
            self.snapshot.uploaded_resources.len(),
            self.snapshot.learning_topics.len()
        );
        Ok(())
    }

    /// Append a message and persist. Messages are never reordered or removed
    /// individually; insertion order is the only ordering signal.
    pub fn add_message(&mut self, message: Message) -> Result<Message> {
        self.snapshot.messages.push(message.clone());
        self.persist()?;
        Ok(message)
    }

    /// All messages, in insertion order
    pub fn messages(&self) -> Vec<Message> {
        self.snapshot.messages.clone()
    }

    /// Insert a resource, stamping `created_at` to now, and persist.
    ///
    /// The draft shape has no timestamp field, so the store is the sole
    /// authority for `created_at`.
    pub fn add_resource(&mut self, draft: ResourceDraft) -> Result<UploadedResource> {
        let resource = UploadedResource {
            id: draft.id,
            kind: draft.kind,
            name: draft.name,
            url: draft.url,
            content: draft.content,
            created_at: Utc::now(),
        };
        self.snapshot.uploaded_resources.push(resource.clone());
        self.persist()?;
        Ok(resource)
    }

    /// All resources, in insertion order
    pub fn resources(&self) -> Vec<UploadedResource> {
        self.snapshot.uploaded_resources.clone()
    }

    /// Upsert a topic by exact, case-sensitive name match and persist.
    ///
    /// An existing topic gets `last_studied` refreshed and `delta` applied to
    /// its proficiency, clamped to `[0, 100]`. A first mention is seeded with
    /// the configured starting proficiency, ignoring `delta`.
    pub fn update_learning_topic(&mut self, name: &str, delta: i32) -> Result<()> {
        let now = Utc::now();
        match self
            .snapshot
            .learning_topics
            .iter_mut()
            .find(|t| t.name == name)
        {
            Some(topic) => {
                topic.last_studied = now;
                topic.proficiency = (i32::from(topic.proficiency) + delta).clamp(0, 100) as u8;
            }
            None => {
                self.snapshot.learning_topics.push(LearningTopic {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    last_studied: now,
                    proficiency: self.config.seed_proficiency.min(100),
                });
            }
        }
        self.persist()
    }

    /// Upsert a topic with the configured default delta
    pub fn record_topic(&mut self, name: &str) -> Result<()> {
        self.update_learning_topic(name, self.config.default_delta)
    }

    /// All topics, most recently studied first
    pub fn learning_topics(&self) -> Vec<LearningTopic> {
        let mut topics = self.snapshot.learning_topics.clone();
        topics.sort_by(|a, b| b.last_studied.cmp(&a.last_studied));
        topics
    }

    /// Textual digest of recent activity for prompt context: the last
    /// `limit` messages as `role: content` lines, then the last resources
    /// (up to the configured count) as `type: name` lines.
    pub fn context_summary_with_limit(&self, limit: usize) -> String {
        let messages = &self.snapshot.messages;
        let recent_messages = messages[messages.len().saturating_sub(limit)..]
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n");

        let resources = &self.snapshot.uploaded_resources;
        let start = resources
            .len()
            .saturating_sub(self.config.summary_resource_limit);
        let recent_resources = resources[start..]
            .iter()
            .map(|r| format!("{}: {}", r.kind.as_str(), r.name))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Recent conversation:\n{}\n\nRecent resources:\n{}",
            recent_messages, recent_resources
        )
    }

    /// Context summary with the configured message limit
    pub fn context_summary(&self) -> String {
        self.context_summary_with_limit(self.config.summary_message_limit)
    }

    /// Reset all three collections to empty and persist the empty state
    pub fn clear(&mut self) -> Result<()> {
        self.snapshot = MemorySnapshot::default();
        self.persist()
    }
}
