//! Tutormind - Persistent conversational memory for an AI learning assistant
//!
//! Tutormind is the durable core of a learning-assistant front end: it keeps
//! a session's chat history, uploaded study resources, and a coarse
//! topic-proficiency model, and survives restarts by writing a full JSON
//! snapshot to a key-value substrate after every mutation.
//!
//! ## Architecture
//!
//! ```text
//! front end ──▶ TutorSession ──▶ TextGenerator (remote generateContent API)
//!                   │
//!                   ▼
//!              MemoryStore ──▶ StorageBackend (one JSON snapshot per key)
//! ```
//!
//! The store is synchronous and single-writer: every mutator applies the
//! change in memory and immediately persists the whole snapshot. The only
//! async boundary is the upstream call, which lives in [`upstream`] and is
//! driven by [`tutor::TutorSession`]. A failed upstream turn never changes
//! the store's contract; it just means no assistant message is appended.
//!
//! There is no ambient singleton: embedders construct a [`MemoryStore`] over
//! a [`memory::StorageBackend`] and pass it to whatever layer needs it, so
//! every test gets an isolated store over an isolated substrate.
//!
//! ## Modules
//!
//! - [`memory`]: record types, the durable substrate, and the memory store
//! - [`upstream`]: the generative-text endpoint boundary
//! - [`tutor`]: session controller wiring store and upstream together
//! - [`config`]: configuration management
//! - [`error`]: crate error type

pub mod config;
pub mod error;
pub mod memory;
pub mod tutor;
pub mod upstream;

pub use config::TutormindConfig;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use tutor::TutorSession;
