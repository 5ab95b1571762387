//! # Letterpress Model
//!
//! Data model for newsletter documents.
//!
//! A newsletter is an ordered list of content elements. Most elements
//! are leaves (heading, text, image, button, ...); the `columns`
//! element carries an ordered list of column slots, each itself an
//! ordered list of elements. Every element has a document-unique id,
//! and all lookup, update, and removal key by id alone.
//!
//! The model is pure data: it knows nothing about rendering, sending,
//! or persistence beyond being serde round-trippable. Editing
//! semantics live in `letterpress-editor`.

pub mod document;
pub mod element;
pub mod id_generator;
pub mod personalization;
pub mod templates;

pub use document::{Document, Metadata, SlotRef, Status};
pub use element::{
    Element, ElementKind, PersonalizedField, SocialLink, StyleMap, StyleValue,
};
pub use id_generator::{get_document_id, IdGenerator};
pub use personalization::{MergeTag, MergeTagCatalog};
pub use templates::Template;
