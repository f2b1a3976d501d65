//! Memory record types
//!
//! One `Message` per conversation turn, one `UploadedResource` per
//! user-contributed file or link, and one `LearningTopic` per distinct topic
//! name. All timestamps are `DateTime<Utc>` in memory and RFC 3339 strings in
//! the persisted snapshot, so they round-trip as instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One turn in a conversation.
///
/// Messages are append-only: the store never edits or removes an individual
/// message, so a caller tracking an async round-trip sets `status` before
/// handing the message over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque unique identifier, caller-assigned
    pub id: String,
    /// Author of the turn
    pub role: Role,
    /// Text body; may be empty (streaming placeholder)
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Round-trip status, meaningful for user-authored turns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    /// Attached files, in caller order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user
    User,
    /// Generative upstream
    Assistant,
    /// Injected instruction
    System,
}

/// Delivery status of a user-authored message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Awaiting the upstream round-trip
    Sending,
    /// Round-trip completed
    Sent,
    /// Round-trip failed
    Error,
}

/// A file attached to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Kind of attachment
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// Location of the attachment content
    pub url: String,
    /// Display name
    pub name: String,
    /// Optional preview image location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Kind of message attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
    Audio,
    Video,
}

/// Metadata for a file or link a user has contributed.
///
/// `created_at` is stamped by the store at insertion time; see
/// [`ResourceDraft`] for the caller-facing insert shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedResource {
    /// Opaque unique identifier
    pub id: String,
    /// Kind of resource
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Display name
    pub name: String,
    /// Location of the resource content
    pub url: String,
    /// Extracted text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Insertion time, assigned by the store
    pub created_at: DateTime<Utc>,
}

/// Kind of uploaded resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Document,
    Image,
    Audio,
    Video,
}

impl ResourceKind {
    /// Wire name of the kind, as it appears in context summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Document => "document",
            ResourceKind::Image => "image",
            ResourceKind::Audio => "audio",
            ResourceKind::Video => "video",
        }
    }
}

impl Role {
    /// Wire name of the role, as it appears in context summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Caller-facing shape for inserting a resource.
///
/// Deliberately has no timestamp field: the store is the only authority for
/// `created_at`, so a caller cannot supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDraft {
    /// Opaque unique identifier
    pub id: String,
    /// Kind of resource
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Display name
    pub name: String,
    /// Location of the resource content
    pub url: String,
    /// Extracted text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ResourceDraft {
    /// Create a draft with a generated id and no extracted content
    pub fn new(kind: ResourceKind, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            name: name.into(),
            url: url.into(),
            content: None,
        }
    }

    /// Attach extracted text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Coarse proficiency tracker, keyed by topic name.
///
/// `name` is the upsert key: exact string match, case-sensitive. Proficiency
/// is clamped to `[0, 100]` by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningTopic {
    /// Opaque unique identifier
    pub id: String,
    /// Topic name, the natural key
    pub name: String,
    /// Last time the topic was mentioned
    pub last_studied: DateTime<Utc>,
    /// Proficiency on a 0-100 scale
    pub proficiency: u8,
}

/// Builder for constructing `Message` instances
pub struct MessageBuilder {
    id: Option<String>,
    role: Role,
    content: String,
    timestamp: Option<DateTime<Utc>>,
    status: Option<MessageStatus>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    /// Create a new builder with the required role
    pub fn new(role: Role) -> Self {
        Self {
            id: None,
            role,
            content: String::new(),
            timestamp: None,
            status: None,
            attachments: Vec::new(),
        }
    }

    /// Override the generated id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the text body
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Override the creation time
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the round-trip status
    pub fn status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Append an attachment
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Build the message
    pub fn build(self) -> Message {
        Message {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            role: self.role,
            content: self.content,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            status: self.status,
            attachments: if self.attachments.is_empty() {
                None
            } else {
                Some(self.attachments)
            },
        }
    }
}
