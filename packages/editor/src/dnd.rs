//! Drag-and-drop insertion targeting.
//!
//! The geometry is kept pure so it is unit-testable without a
//! rendering environment: given a pointer height and a target's
//! rendered box, decide before/after; given the decision, derive the
//! insertion index; given the source index, correct for the removal
//! shift. Event wiring and indicator styling are presentation
//! concerns and live with the UI, not here.

use letterpress_model::ElementKind;

/// Where a drop lands relative to the target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
}

/// Midpoint rule: above the vertical middle of the target's box means
/// insert-before, at or below means insert-after.
pub fn drop_position(pointer_y: f64, target_top: f64, target_height: f64) -> DropPosition {
    if pointer_y < target_top + target_height / 2.0 {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}

/// Intended top-level insertion index for a drop on `target_index`.
pub fn insertion_index(target_index: usize, position: DropPosition) -> usize {
    match position {
        DropPosition::Before => target_index,
        DropPosition::After => target_index + 1,
    }
}

/// Correct the intended insertion point for the source removal shift.
///
/// Removing the source element first shifts every later index down by
/// one, so dropping downward must splice one position earlier than the
/// indicator showed.
pub fn corrected_index(source_index: usize, insertion_point: usize) -> usize {
    if source_index < insertion_point {
        insertion_point - 1
    } else {
        insertion_point
    }
}

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// An existing top-level element, by its current index.
    Element { source_index: usize },
    /// A palette token; dropping creates a new element of this kind.
    Palette { kind: ElementKind },
}

/// Transient per-drag state. Reset fully on drop or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub source: DragSource,
    /// Last computed insertion index, if the pointer has crossed a
    /// candidate target yet.
    pub insertion_point: Option<usize>,
}

impl DragState {
    pub fn new(source: DragSource) -> Self {
        Self {
            source,
            insertion_point: None,
        }
    }
}
