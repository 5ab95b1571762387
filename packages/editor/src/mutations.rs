//! Document mutations.
//!
//! High-level semantic operations on newsletter documents.
//!
//! ## Semantics
//!
//! ### Insert
//! - New elements always enter the top-level list, never a column slot
//! - Out-of-bounds or missing index appends at the end
//!
//! ### Update
//! - `style` keys are shallow-merged over the existing bag
//! - All other supplied fields replace wholesale
//! - Missing target id is a benign no-op
//!
//! ### Remove
//! - Excises the element from wherever it lives, siblings close the gap
//! - Removing a columns container discards its nested elements
//! - Missing target id is a benign no-op
//!
//! ### Duplicate
//! - Deep copy with fresh ids at every depth
//! - Copy lands immediately after the original in its containing array
//!
//! ### Reorder
//! - Top-level only; the insertion point is corrected for the source
//!   removal shift before splicing
//! - Landing back on the source position reports `changed: false` so
//!   the session records no history entry
//!
//! ### InsertPersonalization
//! - Only heading/text/passage accept merge tags
//! - Ineligible kind or unknown tag is a rejection the caller surfaces

use letterpress_model::{
    Document, Element, ElementKind, IdGenerator, MergeTagCatalog, PersonalizedField, SocialLink,
    StyleMap,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Partial set of field changes for [`Mutation::Update`].
///
/// `None` fields are left untouched. Fields that do not exist on the
/// target element's kind are ignored, matching how the property panel
/// only ever emits fields for the kind it is showing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Shallow-merged over the existing style bag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "socialLinks")]
    pub links: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Vec<Element>>>,
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn style(style: StyleMap) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }
}

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a new element with kind defaults at a top-level index
    Insert {
        kind: ElementKind,
        index: Option<usize>,
    },

    /// Merge a partial field patch into an element
    Update { id: String, patch: ElementPatch },

    /// Remove an element from wherever it lives
    Remove { id: String },

    /// Deep-copy an element next to the original, with fresh ids
    Duplicate { id: String },

    /// Move a top-level element to a computed insertion point
    Reorder {
        source_index: usize,
        insertion_point: usize,
    },

    /// Append a merge tag to a text-bearing element's content
    InsertPersonalization { id: String, tag_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Index out of range: {index} (document has {len} elements)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Element does not accept personalization: {0:?}")]
    NotTextBearing(ElementKind),

    #[error("Unknown merge tag: {0}")]
    UnknownMergeTag(String),
}

/// Result of applying a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Id of the element the mutation created, if any.
    pub new_id: Option<String>,

    /// Whether the document actually changed. Benign no-ops (missing
    /// id, reorder landing on its own position) report `false`.
    pub changed: bool,
}

impl Applied {
    fn unchanged() -> Self {
        Self {
            new_id: None,
            changed: false,
        }
    }

    fn changed() -> Self {
        Self {
            new_id: None,
            changed: true,
        }
    }

    fn created(id: String) -> Self {
        Self {
            new_id: Some(id),
            changed: true,
        }
    }
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(
        &self,
        doc: &mut Document,
        ids: &mut IdGenerator,
        tags: &MergeTagCatalog,
    ) -> Result<Applied, MutationError> {
        self.validate(doc, tags)?;

        debug!(mutation = ?self, "applying mutation");

        match self {
            Mutation::Insert { kind, index } => Ok(Self::apply_insert(doc, *kind, *index, ids)),

            Mutation::Update { id, patch } => Ok(Self::apply_update(doc, id, patch)),

            Mutation::Remove { id } => Ok(Self::apply_remove(doc, id)),

            Mutation::Duplicate { id } => Ok(Self::apply_duplicate(doc, id, ids)),

            Mutation::Reorder {
                source_index,
                insertion_point,
            } => Ok(Self::apply_reorder(doc, *source_index, *insertion_point)),

            Mutation::InsertPersonalization { id, tag_id } => {
                Self::apply_personalization(doc, id, tag_id, tags)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document, tags: &MergeTagCatalog) -> Result<(), MutationError> {
        match self {
            // Benign when the target is missing; index clamps on apply.
            Mutation::Insert { .. }
            | Mutation::Update { .. }
            | Mutation::Remove { .. }
            | Mutation::Duplicate { .. } => Ok(()),

            Mutation::Reorder { source_index, .. } => {
                if *source_index >= doc.len() {
                    return Err(MutationError::IndexOutOfRange {
                        index: *source_index,
                        len: doc.len(),
                    });
                }
                Ok(())
            }

            Mutation::InsertPersonalization { id, tag_id } => {
                if tags.get(tag_id).is_none() {
                    return Err(MutationError::UnknownMergeTag(tag_id.clone()));
                }
                if let Some(element) = doc.find(id) {
                    if !element.kind().is_text_bearing() {
                        return Err(MutationError::NotTextBearing(element.kind()));
                    }
                }
                // Missing id falls through: stale selection, benign.
                Ok(())
            }
        }
    }

    fn apply_insert(
        doc: &mut Document,
        kind: ElementKind,
        index: Option<usize>,
        ids: &mut IdGenerator,
    ) -> Applied {
        let element = Element::with_defaults(kind, ids);
        let new_id = element.id().to_string();

        let at = index
            .filter(|&i| i <= doc.elements.len())
            .unwrap_or(doc.elements.len());
        doc.elements.insert(at, element);

        Applied::created(new_id)
    }

    fn apply_update(doc: &mut Document, id: &str, patch: &ElementPatch) -> Applied {
        let Some(element) = doc.find_mut(id) else {
            return Applied::unchanged();
        };

        if let Some(content) = &patch.content {
            if let Some(slot) = element.content_mut() {
                *slot = content.clone();
            }
        }

        if let Some(style) = &patch.style {
            // Shallow merge: new keys overlay, unspecified keys stay.
            let bag = element.style_mut();
            for (key, value) in style {
                bag.insert(key.clone(), value.clone());
            }
        }

        // Kind-specific fields replace wholesale; fields the kind does
        // not carry are ignored.
        match element {
            Element::Image { src, alt, .. } => {
                if let Some(new_src) = &patch.src {
                    *src = new_src.clone();
                }
                if let Some(new_alt) = &patch.alt {
                    *alt = new_alt.clone();
                }
            }
            Element::Button { url, .. } => {
                if let Some(new_url) = &patch.url {
                    *url = new_url.clone();
                }
            }
            Element::Spacer { height, .. } => {
                if let Some(new_height) = patch.height {
                    *height = new_height;
                }
            }
            Element::Social { links, .. } => {
                if let Some(new_links) = &patch.links {
                    *links = new_links.clone();
                }
            }
            Element::Columns { columns, .. } => {
                if let Some(new_columns) = &patch.columns {
                    *columns = new_columns.clone();
                }
            }
            _ => {}
        }

        Applied::changed()
    }

    fn apply_remove(doc: &mut Document, id: &str) -> Applied {
        match doc.remove(id) {
            Some(_) => Applied::changed(),
            None => Applied::unchanged(),
        }
    }

    fn apply_duplicate(doc: &mut Document, id: &str, ids: &mut IdGenerator) -> Applied {
        match duplicate_in(&mut doc.elements, id, ids) {
            Some(new_id) => Applied::created(new_id),
            None => Applied::unchanged(),
        }
    }

    fn apply_reorder(doc: &mut Document, source_index: usize, insertion_point: usize) -> Applied {
        let insertion_point = insertion_point.min(doc.elements.len());

        // Removing the source shifts later indices down by one.
        let actual = if source_index < insertion_point {
            insertion_point - 1
        } else {
            insertion_point
        };

        if actual == source_index {
            return Applied::unchanged();
        }

        let element = doc.elements.remove(source_index);
        doc.elements.insert(actual, element);

        Applied::changed()
    }

    fn apply_personalization(
        doc: &mut Document,
        id: &str,
        tag_id: &str,
        tags: &MergeTagCatalog,
    ) -> Result<Applied, MutationError> {
        let tag = tags
            .get(tag_id)
            .ok_or_else(|| MutationError::UnknownMergeTag(tag_id.to_string()))?;

        let Some(element) = doc.find_mut(id) else {
            return Ok(Applied::unchanged());
        };

        let kind = element.kind();
        if !kind.is_text_bearing() {
            return Err(MutationError::NotTextBearing(kind));
        }

        if let Some(content) = element.content_mut() {
            if !content.is_empty() && !content.ends_with([' ', '\n']) {
                content.push(' ');
            }
            content.push_str(&tag.default_value);
        }

        if let Some(fields) = element.personalized_fields_mut() {
            fields.push(PersonalizedField {
                field_name: tag.id.clone(),
                default_value: tag.default_value.clone(),
            });
        }

        Ok(Applied::changed())
    }
}

/// Find an element anywhere, deep-copy it with fresh ids, and insert
/// the copy right after the original in its own containing array.
fn duplicate_in(elements: &mut Vec<Element>, id: &str, ids: &mut IdGenerator) -> Option<String> {
    if let Some(pos) = elements.iter().position(|e| e.id() == id) {
        let mut copy = elements[pos].clone();
        copy.reassign_ids(ids);
        let new_id = copy.id().to_string();
        elements.insert(pos + 1, copy);
        return Some(new_id);
    }

    for element in elements.iter_mut() {
        if let Some(slots) = element.column_slots_mut() {
            for slot in slots.iter_mut() {
                if let Some(new_id) = duplicate_in(slot, id, ids) {
                    return Some(new_id);
                }
            }
        }
    }

    None
}
