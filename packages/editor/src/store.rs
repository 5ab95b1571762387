//! Persistence and delivery boundaries.
//!
//! The editor treats storage and the mailer as opaque request/response
//! collaborators. Failures here are caught at the call site and
//! surfaced; they never touch the in-memory document or history.

use letterpress_model::{Document, Metadata};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Newsletter not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Mailer rejected the request: {0}")]
    Rejected(String),
}

/// Document persistence boundary.
///
/// Saving the same content twice must produce the same stored result.
pub trait DocumentStore {
    fn load(&self, id: &str) -> Result<(Document, Metadata), StoreError>;
    fn save(&mut self, id: &str, doc: &Document, meta: &Metadata) -> Result<(), StoreError>;
}

/// Rendering/delivery boundary.
pub trait Mailer {
    /// Render and deliver a one-off copy to one address.
    fn send_test(&self, doc: &Document, meta: &Metadata, to: &str) -> Result<(), MailerError>;

    /// Fan the rendered document out to the active subscriber set.
    fn publish(&self, doc: &Document, meta: &Metadata) -> Result<DeliveryReport, MailerError>;
}

/// Per-send delivery counts returned by [`Mailer::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
}

/// In-memory store holding the persisted JSON form. Used by tests and
/// as the reference for what a real backend receives.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, id: &str) -> Result<(Document, Metadata), StoreError> {
        let raw = self
            .records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let record: (Document, Metadata) = serde_json::from_str(raw)?;
        Ok(record)
    }

    fn save(&mut self, id: &str, doc: &Document, meta: &Metadata) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&(doc, meta))?;
        self.records.insert(id.to_string(), raw);
        Ok(())
    }
}
