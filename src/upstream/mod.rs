//! Upstream text generation — the one real network boundary.

pub mod client;

pub use client::GenerativeClient;

use crate::error::Result;
use async_trait::async_trait;

/// A source of generated reply text.
///
/// The trait is the seam between the tutoring layer and the remote API:
/// tests substitute a scripted implementation, production wires in
/// [`GenerativeClient`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
