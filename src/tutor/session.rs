//! Tutoring session controller
//!
//! Glue between the memory store and the generative upstream. The session
//! owns one store and one generator; a front end drives it one turn at a
//! time. The store only ever receives fully-formed messages: the async
//! round-trip happens here, outside the store.

use crate::error::Result;
use crate::memory::{
    LearningTopic, Message, MessageBuilder, MessageStatus, MemoryStore, ResourceDraft, Role,
    UploadedResource,
};
use crate::upstream::TextGenerator;

/// One tutoring conversation bound to a memory store and an upstream.
pub struct TutorSession {
    store: MemoryStore,
    generator: Box<dyn TextGenerator>,
}

impl TutorSession {
    /// Create a session over an already-hydrated store
    pub fn new(store: MemoryStore, generator: Box<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// Run one user turn: record the user message, ask the upstream for a
    /// reply with recent context, and record the assistant message.
    ///
    /// On upstream failure the user message is still recorded, marked
    /// [`MessageStatus::Error`], no assistant message is appended, and the
    /// error is returned to the caller.
    pub async fn send(&mut self, text: &str) -> Result<Message> {
        let prompt = format!("{}\n\nuser: {}", self.store.context_summary(), text);

        let user_message = MessageBuilder::new(Role::User).content(text);

        match self.generator.generate(&prompt).await {
            Ok(reply) => {
                self.store
                    .add_message(user_message.status(MessageStatus::Sent).build())?;
                let assistant = MessageBuilder::new(Role::Assistant).content(reply).build();
                self.store.add_message(assistant)
            }
            Err(e) => {
                tracing::warn!("Upstream turn failed: {}", e);
                self.store
                    .add_message(user_message.status(MessageStatus::Error).build())?;
                Err(e)
            }
        }
    }

    /// Record an uploaded resource
    pub fn upload(&mut self, draft: ResourceDraft) -> Result<UploadedResource> {
        self.store.add_resource(draft)
    }

    /// Mark a topic as studied this turn
    pub fn note_topic(&mut self, name: &str) -> Result<()> {
        self.store.record_topic(name)
    }

    /// Conversation history, in order
    pub fn history(&self) -> Vec<Message> {
        self.store.messages()
    }

    /// Topics studied so far, most recent first
    pub fn topics(&self) -> Vec<LearningTopic> {
        self.store.learning_topics()
    }

    /// Forget everything: history, resources, and topics
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()
    }

    /// The underlying store, for callers needing direct access
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}
