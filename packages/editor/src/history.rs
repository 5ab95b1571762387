//! Undo/redo history.
//!
//! Linear history of full document snapshots plus a current index.
//! Recording after an undo truncates the discarded branch. Documents
//! are tens of elements, so whole-document snapshots keep the equality
//! and undo semantics trivially correct; no structural sharing.
//!
//! Invariant: `index < snapshots.len()`, and the snapshot at `index`
//! equals the live document after any mutation settles.

use letterpress_model::Document;

/// Snapshot history for one editing session.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Document>,
    index: usize,
}

impl History {
    /// Start history at the document as loaded.
    pub fn new(initial: Document) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Record the document after a mutation settles.
    ///
    /// No-op (returns `false`) when the document is structurally equal
    /// to the current snapshot. Otherwise truncates any snapshots past
    /// the current index and appends.
    pub fn record(&mut self, doc: &Document) -> bool {
        if self.snapshots[self.index] == *doc {
            return false;
        }

        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(doc.clone());
        self.index += 1;
        true
    }

    /// Step back one snapshot. `None` at the floor (benign rejection).
    pub fn undo(&mut self) -> Option<&Document> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. `None` at the tail.
    pub fn redo(&mut self) -> Option<&Document> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// The snapshot the live document currently equals.
    pub fn current(&self) -> &Document {
        &self.snapshots[self.index]
    }

    /// Number of snapshots held (always at least one).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_model::{Element, ElementKind, IdGenerator};

    fn doc_with(n: usize) -> Document {
        let mut ids = IdGenerator::new("history-test");
        Document {
            elements: (0..n)
                .map(|_| Element::with_defaults(ElementKind::Text, &mut ids))
                .collect(),
        }
    }

    #[test]
    fn test_initial_state() {
        let history = History::new(doc_with(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_advances() {
        let mut history = History::new(doc_with(0));
        assert!(history.record(&doc_with(1)));
        assert!(history.record(&doc_with(2)));

        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_equal_document_is_noop() {
        let doc = doc_with(1);
        let mut history = History::new(doc.clone());

        assert!(!history.record(&doc));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_redo_walks_snapshots() {
        let mut history = History::new(doc_with(0));
        let one = doc_with(1);
        let two = doc_with(2);
        history.record(&one);
        history.record(&two);

        assert_eq!(history.undo().unwrap().len(), 1);
        assert_eq!(history.index(), 1);
        assert_eq!(history.redo().unwrap().len(), 2);
        assert_eq!(history.index(), 2);
    }

    #[test]
    fn test_boundaries_reject_without_change() {
        let mut history = History::new(doc_with(0));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_record_after_undo_truncates_branch() {
        let mut history = History::new(doc_with(0));
        history.record(&doc_with(1));
        history.record(&doc_with(2));

        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.record(&doc_with(3));
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert!(!history.can_redo());
    }
}
