//! Conversational memory — durable store for chat history, uploaded
//! resources, and topic proficiency.

pub mod storage;
pub mod store;
pub mod types;

pub use storage::{FileStorage, StorageBackend};
pub use store::MemoryStore;
pub use types::{
    Attachment, AttachmentKind, LearningTopic, Message, MessageBuilder, MessageStatus,
    ResourceDraft, ResourceKind, Role, UploadedResource,
};
