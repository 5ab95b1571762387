//! Newsletter document container.
//!
//! A document is the ordered top-level element list. Lookup, location,
//! and removal all key by element id and search depth-first: top-level
//! order, then column order, then slot-internal order. The first match
//! in that traversal wins; duplicate ids are a precondition violation,
//! not supported behavior.
//!
//! Not-found is a normal outcome (stale selection after deletion) and
//! is always `None` / `false`, never an error.

use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Identifies the array that directly contains an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRef {
    /// The document's top-level element list.
    TopLevel,
    /// A column slot inside a `Columns` element.
    Column { container_id: String, slot: usize },
}

/// The full ordered element list of one newsletter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Find an element anywhere in the document.
    pub fn find(&self, id: &str) -> Option<&Element> {
        find_in(&self.elements, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_in_mut(&mut self.elements, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Locate an element: which array directly contains it, and at
    /// what position.
    pub fn locate(&self, id: &str) -> Option<(SlotRef, usize)> {
        if let Some(pos) = self.elements.iter().position(|e| e.id() == id) {
            return Some((SlotRef::TopLevel, pos));
        }

        for element in &self.elements {
            if let Some(slots) = element.column_slots() {
                if let Some(found) = locate_in_slots(element.id(), slots, id) {
                    return Some(found);
                }
            }
        }

        None
    }

    /// Excise an element from wherever it lives and return it.
    /// Removing a `Columns` container discards its nested elements
    /// with it; children are not promoted.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        remove_from(&mut self.elements, id)
    }

    /// Every id in the document, including inside column slots, in
    /// traversal order.
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        collect_ids(&self.elements, &mut ids);
        ids
    }
}

fn find_in<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    for element in elements {
        if element.id() == id {
            return Some(element);
        }
        if let Some(slots) = element.column_slots() {
            for slot in slots {
                if let Some(found) = find_in(slot, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn find_in_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for element in elements.iter_mut() {
        if element.id() == id {
            return Some(element);
        }
        if let Some(slots) = element.column_slots_mut() {
            for slot in slots.iter_mut() {
                if let Some(found) = find_in_mut(slot, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn locate_in_slots(
    container_id: &str,
    slots: &[Vec<Element>],
    id: &str,
) -> Option<(SlotRef, usize)> {
    for (slot_index, slot) in slots.iter().enumerate() {
        if let Some(pos) = slot.iter().position(|e| e.id() == id) {
            return Some((
                SlotRef::Column {
                    container_id: container_id.to_string(),
                    slot: slot_index,
                },
                pos,
            ));
        }

        // Columns nested inside a slot are not constructed by the UI,
        // but the traversal handles them all the same.
        for element in slot {
            if let Some(inner) = element.column_slots() {
                if let Some(found) = locate_in_slots(element.id(), inner, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn remove_from(elements: &mut Vec<Element>, id: &str) -> Option<Element> {
    if let Some(pos) = elements.iter().position(|e| e.id() == id) {
        return Some(elements.remove(pos));
    }

    for element in elements.iter_mut() {
        if let Some(slots) = element.column_slots_mut() {
            for slot in slots.iter_mut() {
                if let Some(removed) = remove_from(slot, id) {
                    return Some(removed);
                }
            }
        }
    }

    None
}

fn collect_ids<'a>(elements: &'a [Element], out: &mut Vec<&'a str>) {
    for element in elements {
        out.push(element.id());
        if let Some(slots) = element.column_slots() {
            for slot in slots {
                collect_ids(slot, out);
            }
        }
    }
}

/// Delivery status of a newsletter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Published,
}

/// Newsletter metadata, persisted alongside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    pub subject: String,
    pub preview_text: String,
    pub status: Status,
}

impl Metadata {
    pub fn draft(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: String::new(),
            preview_text: String::new(),
            status: Status::Draft,
        }
    }
}
