//! Editing session.
//!
//! One `EditorSession` owns everything a single-user editing surface
//! needs: the live document, its metadata, the id generator, the
//! snapshot history, the current selection, and transient drag state.
//! All mutations are synchronous in-memory transformations; the only
//! asynchronous boundary is the storage/mailer collaborators, which
//! never touch session state on failure.
//!
//! Settle rule: every mutation that actually changes the document
//! records one history snapshot. Benign no-ops (missing ids, a drop
//! landing back on its own position) record nothing.

use crate::dnd::{self, DragSource, DragState};
use crate::errors::EditorError;
use crate::history::History;
use crate::mutations::{Applied, Mutation};
use crate::store::{DeliveryReport, DocumentStore, Mailer};
use letterpress_model::{
    Document, ElementKind, IdGenerator, MergeTagCatalog, Metadata, Status, Template,
};
use tracing::debug;

/// Outcome of an undo/redo request. Boundary hits are informational,
/// never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    Applied,
    Nothing,
}

/// Outcome of completing a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// An existing element moved; it stays selected.
    Reordered { id: String },
    /// A palette drop created a new element; it becomes selected.
    Inserted { id: String },
    /// Nothing happened (no drag, no target, or landed in place).
    NoOp,
}

/// Single-user editing session for one newsletter.
pub struct EditorSession {
    pub newsletter_id: String,
    pub document: Document,
    pub metadata: Metadata,
    ids: IdGenerator,
    history: History,
    tags: MergeTagCatalog,
    selection: Option<String>,
    drag: Option<DragState>,
    last_saved: Option<(Document, Metadata)>,
}

impl EditorSession {
    /// Start a new newsletter from a named template.
    pub fn from_template(
        newsletter_id: &str,
        name: &str,
        template_name: &str,
    ) -> Result<Self, EditorError> {
        let template = Template::from_name(template_name)
            .ok_or_else(|| EditorError::UnknownTemplate(template_name.to_string()))?;

        let mut ids = IdGenerator::new(newsletter_id);
        let document = template.instantiate(&mut ids);
        let history = History::new(document.clone());

        Ok(Self {
            newsletter_id: newsletter_id.to_string(),
            document,
            metadata: Metadata::draft(name),
            ids,
            history,
            tags: MergeTagCatalog::standard(),
            selection: None,
            drag: None,
            last_saved: None,
        })
    }

    /// Resume editing a persisted newsletter.
    pub fn load(store: &impl DocumentStore, newsletter_id: &str) -> Result<Self, EditorError> {
        let (document, metadata) = store.load(newsletter_id)?;

        let mut ids = IdGenerator::new(newsletter_id);
        ids.resume_past(document.all_ids());

        let history = History::new(document.clone());
        let last_saved = Some((document.clone(), metadata.clone()));

        Ok(Self {
            newsletter_id: newsletter_id.to_string(),
            document,
            metadata,
            ids,
            history,
            tags: MergeTagCatalog::standard(),
            selection: None,
            drag: None,
            last_saved,
        })
    }

    /// Replace the built-in merge tag catalog.
    pub fn with_merge_tags(mut self, tags: MergeTagCatalog) -> Self {
        self.tags = tags;
        self
    }

    pub fn merge_tags(&self) -> &MergeTagCatalog {
        &self.tags
    }

    /// Apply a mutation and settle history and selection.
    ///
    /// Newly created elements (insert, duplicate) become the
    /// selection; a selection pointing at a removed element is
    /// cleared.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Applied, EditorError> {
        let applied = mutation.apply(&mut self.document, &mut self.ids, &self.tags)?;

        if applied.changed {
            self.history.record(&self.document);
        }

        if let Some(selected) = &self.selection {
            if !self.document.contains(selected) {
                self.selection = None;
            }
        }
        if let Some(new_id) = &applied.new_id {
            self.selection = Some(new_id.clone());
        }

        Ok(applied)
    }

    // ---- selection ----

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Select an element. Returns `false` (and leaves the selection
    /// alone) if no element with that id exists.
    pub fn select(&mut self, id: &str) -> bool {
        if self.document.contains(id) {
            self.selection = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ---- history ----

    pub fn undo(&mut self) -> HistoryOutcome {
        match self.history.undo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.selection = None;
                debug!(index = self.history.index(), "undo");
                HistoryOutcome::Applied
            }
            None => HistoryOutcome::Nothing,
        }
    }

    pub fn redo(&mut self) -> HistoryOutcome {
        match self.history.redo() {
            Some(snapshot) => {
                self.document = snapshot.clone();
                self.selection = None;
                debug!(index = self.history.index(), "redo");
                HistoryOutcome::Applied
            }
            None => HistoryOutcome::Nothing,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ---- drag and drop ----

    /// Start dragging an existing top-level element.
    pub fn begin_element_drag(&mut self, source_index: usize) -> Result<(), EditorError> {
        if source_index >= self.document.len() {
            return Err(crate::mutations::MutationError::IndexOutOfRange {
                index: source_index,
                len: self.document.len(),
            }
            .into());
        }
        self.drag = Some(DragState::new(DragSource::Element { source_index }));
        Ok(())
    }

    /// Start dragging a palette token.
    pub fn begin_palette_drag(&mut self, kind: ElementKind) {
        self.drag = Some(DragState::new(DragSource::Palette { kind }));
    }

    /// Recompute the insertion point while the pointer moves over a
    /// candidate target. Returns the computed index so the UI can
    /// position its indicator; `None` when no drag is active.
    pub fn drag_over(
        &mut self,
        target_index: usize,
        pointer_y: f64,
        target_top: f64,
        target_height: f64,
    ) -> Option<usize> {
        let drag = self.drag.as_mut()?;

        let position = dnd::drop_position(pointer_y, target_top, target_height);
        let point = dnd::insertion_index(target_index, position);
        drag.insertion_point = Some(point);

        Some(point)
    }

    /// Commit the drag: reorder for an element source, insert for a
    /// palette source. Drag state is fully reset either way.
    pub fn complete_drag(&mut self) -> Result<DropOutcome, EditorError> {
        let Some(drag) = self.drag.take() else {
            return Ok(DropOutcome::NoOp);
        };
        let Some(insertion_point) = drag.insertion_point else {
            return Ok(DropOutcome::NoOp);
        };

        match drag.source {
            DragSource::Element { source_index } => {
                let Some(moved) = self.document.elements.get(source_index) else {
                    return Ok(DropOutcome::NoOp);
                };
                let moved_id = moved.id().to_string();

                let applied = self.apply(Mutation::Reorder {
                    source_index,
                    insertion_point,
                })?;

                if applied.changed {
                    self.selection = Some(moved_id.clone());
                    Ok(DropOutcome::Reordered { id: moved_id })
                } else {
                    Ok(DropOutcome::NoOp)
                }
            }
            DragSource::Palette { kind } => {
                let applied = self.apply(Mutation::Insert {
                    kind,
                    index: Some(insertion_point),
                })?;

                match applied.new_id {
                    Some(id) => Ok(DropOutcome::Inserted { id }),
                    None => Ok(DropOutcome::NoOp),
                }
            }
        }
    }

    /// Abandon the drag without touching the document.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    // ---- persistence and delivery ----

    /// Persist the document and metadata. Validation failures block
    /// the save before the boundary call and mutate nothing.
    pub fn save(&mut self, store: &mut impl DocumentStore) -> Result<(), EditorError> {
        if self.metadata.name.trim().is_empty() {
            return Err(EditorError::Validation(
                "newsletter name is required".to_string(),
            ));
        }
        if self.metadata.status == Status::Published && self.metadata.subject.trim().is_empty() {
            return Err(EditorError::Validation(
                "subject line is required to publish".to_string(),
            ));
        }

        store.save(&self.newsletter_id, &self.document, &self.metadata)?;
        self.last_saved = Some((self.document.clone(), self.metadata.clone()));
        debug!(newsletter_id = %self.newsletter_id, "saved");
        Ok(())
    }

    /// Whether there are changes not yet persisted.
    pub fn is_dirty(&self) -> bool {
        match &self.last_saved {
            Some((doc, meta)) => *doc != self.document || *meta != self.metadata,
            None => true,
        }
    }

    /// Render and deliver a one-off copy. Does not alter the document
    /// or history.
    pub fn send_test(&self, mailer: &impl Mailer, to: &str) -> Result<(), EditorError> {
        mailer.send_test(&self.document, &self.metadata, to)?;
        Ok(())
    }

    /// Fan out to the active subscriber set. Requires a published
    /// status and at least one prior save.
    pub fn publish(&self, mailer: &impl Mailer) -> Result<DeliveryReport, EditorError> {
        if self.last_saved.is_none() {
            return Err(EditorError::NeverSaved);
        }
        if self.metadata.status != Status::Published {
            return Err(EditorError::Validation(
                "newsletter must be in published status".to_string(),
            ));
        }

        let report = mailer.publish(&self.document, &self.metadata)?;
        debug!(sent = report.sent, failed = report.failed, "published");
        Ok(report)
    }
}
