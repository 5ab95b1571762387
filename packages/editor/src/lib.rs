//! # Letterpress Editor
//!
//! Editing engine for newsletter documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: element tree + templates + merge tags │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session lifecycle + mutations        │
//! │  - Apply mutations with validation           │
//! │  - Snapshot undo/redo history                │
//! │  - Drag-and-drop insertion targeting         │
//! │  - Selection tracking                        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ boundaries: storage + mailer collaborators   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The document is plain data**: rendering and delivery are
//!    derived elsewhere, the editor owns only the element tree
//! 2. **Mutations are synchronous and local**: no operation blocks or
//!    suspends; the storage/mailer boundaries are the only async seam
//!    and they never corrupt in-memory state on failure
//! 3. **Benign no-ops are not errors**: stale ids and history boundary
//!    hits are normal outcomes the UI reports informationally
//!
//! ## Usage
//!
//! ```rust
//! use letterpress_editor::{EditorSession, Mutation, ElementPatch};
//! use letterpress_model::ElementKind;
//!
//! let mut session = EditorSession::from_template("weekly-1", "Weekly #1", "blank")?;
//!
//! let applied = session.apply(Mutation::Insert {
//!     kind: ElementKind::Heading,
//!     index: None,
//! })?;
//! let id = applied.new_id.unwrap();
//!
//! session.apply(Mutation::Update {
//!     id,
//!     patch: ElementPatch::content("Hello"),
//! })?;
//!
//! session.undo();
//! # Ok::<(), letterpress_editor::EditorError>(())
//! ```

mod dnd;
mod errors;
mod history;
mod mutations;
mod session;
mod store;

pub use dnd::{corrected_index, drop_position, insertion_index, DragSource, DragState, DropPosition};
pub use errors::EditorError;
pub use history::History;
pub use mutations::{Applied, ElementPatch, Mutation, MutationError};
pub use session::{DropOutcome, EditorSession, HistoryOutcome};
pub use store::{DeliveryReport, DocumentStore, Mailer, MailerError, MemoryStore, StoreError};

// Re-export common model types for convenience
pub use letterpress_model::{Document, Element, ElementKind, Metadata, Status};
