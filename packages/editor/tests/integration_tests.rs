//! End-to-end session tests: template → edit → drag → undo → save →
//! publish, with the in-memory store and a stub mailer.

use letterpress_editor::{
    DeliveryReport, DropOutcome, EditorError, ElementPatch, ElementKind, EditorSession,
    HistoryOutcome, Mailer, MailerError, MemoryStore, Metadata, Mutation, Status,
};
use letterpress_model::{Document, SlotRef};
use std::cell::RefCell;

/// Mailer stub that records what it was asked to deliver.
#[derive(Default)]
struct StubMailer {
    test_sends: RefCell<Vec<String>>,
    subscribers: usize,
}

impl Mailer for StubMailer {
    fn send_test(&self, _doc: &Document, _meta: &Metadata, to: &str) -> Result<(), MailerError> {
        self.test_sends.borrow_mut().push(to.to_string());
        Ok(())
    }

    fn publish(&self, _doc: &Document, _meta: &Metadata) -> Result<DeliveryReport, MailerError> {
        Ok(DeliveryReport {
            sent: self.subscribers,
            failed: 0,
        })
    }
}

fn blank_session() -> EditorSession {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    EditorSession::from_template("weekly-7", "Weekly #7", "blank").unwrap()
}

fn insert(session: &mut EditorSession, kind: ElementKind) -> String {
    session
        .apply(Mutation::Insert { kind, index: None })
        .unwrap()
        .new_id
        .unwrap()
}

#[test]
fn test_insert_and_style_scenario() {
    let mut session = blank_session();

    let id = insert(&mut session, ElementKind::Heading);
    assert_eq!(session.document.len(), 1);
    let heading = session.document.find(&id).unwrap();
    assert_eq!(heading.content(), Some("Main Heading"));
    let default_style = heading.style().clone();

    session
        .apply(Mutation::Update {
            id: id.clone(),
            patch: ElementPatch::content("Hello"),
        })
        .unwrap();

    let heading = session.document.find(&id).unwrap();
    assert_eq!(heading.content(), Some("Hello"));
    assert_eq!(heading.style(), &default_style);
}

#[test]
fn test_nested_lookup_scenario() {
    let mut session = blank_session();
    let columns_id = insert(&mut session, ElementKind::Columns);

    let slots = session
        .document
        .find(&columns_id)
        .unwrap()
        .column_slots()
        .unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].len(), 1);
    let second_slot_id = slots[1][0].id().to_string();

    let (slot, pos) = session.document.locate(&second_slot_id).unwrap();
    assert_eq!(
        slot,
        SlotRef::Column {
            container_id: columns_id,
            slot: 1
        }
    );
    assert_eq!(pos, 0);
}

#[test]
fn test_drag_reorder_scenario() {
    let mut session = blank_session();
    let a = insert(&mut session, ElementKind::Heading);
    let b = insert(&mut session, ElementKind::Text);
    let c = insert(&mut session, ElementKind::Button);
    let history_before = session.history().len();

    // Drag A and cross C's box below its midpoint: the indicator sits
    // at insertion point 2.
    session.begin_element_drag(0).unwrap();
    let point = session.drag_over(2, 190.0, 100.0, 100.0).unwrap();
    assert_eq!(point, 3);
    let point = session.drag_over(1, 80.0, 50.0, 40.0).unwrap();
    assert_eq!(point, 2);

    let outcome = session.complete_drag().unwrap();
    assert_eq!(outcome, DropOutcome::Reordered { id: a.clone() });

    let order: Vec<&str> = session.document.elements.iter().map(|e| e.id()).collect();
    assert_eq!(order, vec![b.as_str(), a.as_str(), c.as_str()]);

    // One history entry for the reorder, moved element stays selected.
    assert_eq!(session.history().len(), history_before + 1);
    assert_eq!(session.selection(), Some(a.as_str()));
    assert!(session.drag().is_none());
}

#[test]
fn test_drop_in_place_records_nothing() {
    let mut session = blank_session();
    insert(&mut session, ElementKind::Heading);
    insert(&mut session, ElementKind::Text);
    let before = session.document.clone();
    let history_before = session.history().len();

    // Drop element 1 just below its own midpoint: insertion point 2,
    // corrected back to 1.
    session.begin_element_drag(1).unwrap();
    session.drag_over(1, 95.0, 50.0, 40.0).unwrap();
    let outcome = session.complete_drag().unwrap();

    assert_eq!(outcome, DropOutcome::NoOp);
    assert_eq!(session.document, before);
    assert_eq!(session.history().len(), history_before);
}

#[test]
fn test_palette_drop_inserts_at_indicator() {
    let mut session = blank_session();
    insert(&mut session, ElementKind::Heading);
    insert(&mut session, ElementKind::Button);

    session.begin_palette_drag(ElementKind::Divider);
    // Above the second element's midpoint: insert before it.
    session.drag_over(1, 55.0, 50.0, 40.0).unwrap();
    let outcome = session.complete_drag().unwrap();

    let DropOutcome::Inserted { id } = outcome else {
        panic!("expected insert, got {:?}", outcome);
    };
    assert_eq!(session.document.elements[1].id(), id);
    assert_eq!(session.document.elements[1].kind(), ElementKind::Divider);
    assert_eq!(session.selection(), Some(id.as_str()));
}

#[test]
fn test_cancelled_drag_changes_nothing() {
    let mut session = blank_session();
    insert(&mut session, ElementKind::Heading);
    let before = session.document.clone();

    session.begin_element_drag(0).unwrap();
    session.drag_over(0, 10.0, 0.0, 40.0).unwrap();
    session.cancel_drag();

    assert_eq!(session.complete_drag().unwrap(), DropOutcome::NoOp);
    assert_eq!(session.document, before);
}

#[test]
fn test_history_monotonicity_and_branch_truncation() {
    let mut session = blank_session();

    // n distinct mutations -> n+1 snapshots, index n.
    let n = 4;
    for _ in 0..n {
        insert(&mut session, ElementKind::Text);
    }
    assert_eq!(session.history().len(), n + 1);
    assert_eq!(session.history().index(), n);

    // k undos -> index n-k, live document equals that snapshot.
    for k in 1..=2 {
        assert_eq!(session.undo(), HistoryOutcome::Applied);
        assert_eq!(session.history().index(), n - k);
        assert_eq!(session.document.len(), n - k);
    }

    // A new mutation after undoing discards the redo branch.
    insert(&mut session, ElementKind::Divider);
    assert!(!session.can_redo());
    assert_eq!(session.redo(), HistoryOutcome::Nothing);
    assert_eq!(session.history().len(), n);
}

#[test]
fn test_undo_floor_and_redo_tail_are_benign() {
    let mut session = blank_session();
    assert_eq!(session.undo(), HistoryOutcome::Nothing);
    assert_eq!(session.redo(), HistoryOutcome::Nothing);

    insert(&mut session, ElementKind::Text);
    session.undo();
    session.redo();
    assert_eq!(session.redo(), HistoryOutcome::Nothing);
    assert_eq!(session.document.len(), 1);
}

#[test]
fn test_save_requires_name() {
    let mut session = EditorSession::from_template("weekly-7", "", "blank").unwrap();
    let mut store = MemoryStore::new();

    let result = session.save(&mut store);
    assert!(matches!(result, Err(EditorError::Validation(_))));
    assert!(!store.contains("weekly-7"));
}

#[test]
fn test_save_published_requires_subject() {
    let mut session = blank_session();
    session.metadata.status = Status::Published;
    let mut store = MemoryStore::new();

    assert!(matches!(
        session.save(&mut store),
        Err(EditorError::Validation(_))
    ));

    session.metadata.subject = "This week in letterpress".to_string();
    session.save(&mut store).unwrap();
    assert!(store.contains("weekly-7"));
    assert!(!session.is_dirty());
}

#[test]
fn test_save_load_round_trip_resumes_ids() -> anyhow::Result<()> {
    let mut store = MemoryStore::new();

    let mut session = blank_session();
    let first_id = insert(&mut session, ElementKind::Heading);
    session.save(&mut store)?;

    let mut resumed = EditorSession::load(&store, "weekly-7")?;
    assert_eq!(resumed.document, session.document);
    assert!(!resumed.is_dirty());
    assert!(!resumed.can_undo());

    // New ids must not collide with ids persisted by the first
    // session.
    let second_id = insert(&mut resumed, ElementKind::Text);
    assert_ne!(second_id, first_id);
    let all = resumed.document.all_ids();
    let mut deduped: Vec<&str> = all.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), all.len());
    Ok(())
}

#[test]
fn test_publish_requires_prior_save() {
    let mut session = blank_session();
    session.metadata.status = Status::Published;
    session.metadata.subject = "s".to_string();
    let mailer = StubMailer {
        subscribers: 120,
        ..StubMailer::default()
    };

    assert!(matches!(
        session.publish(&mailer),
        Err(EditorError::NeverSaved)
    ));

    let mut store = MemoryStore::new();
    session.save(&mut store).unwrap();
    let report = session.publish(&mailer).unwrap();
    assert_eq!(report.sent, 120);
    assert_eq!(report.failed, 0);
}

#[test]
fn test_full_editing_flow() -> anyhow::Result<()> {
    let mut store = MemoryStore::new();

    let mut session = EditorSession::from_template("weekly-8", "Weekly #8", "basic")?;
    let id = insert(&mut session, ElementKind::Passage);
    session.apply(Mutation::Update {
        id: id.clone(),
        patch: ElementPatch::content("A longer story."),
    })?;
    session.apply(Mutation::InsertPersonalization {
        id: id.clone(),
        tag_id: "firstName".to_string(),
    })?;
    session.save(&mut store)?;

    let resumed = EditorSession::load(&store, "weekly-8")?;
    let passage = resumed.document.find(&id).unwrap();
    assert_eq!(passage.content(), Some("A longer story. {{firstName}}"));
    assert_eq!(passage.personalized_fields().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_send_test_leaves_state_alone() {
    let mut session = blank_session();
    insert(&mut session, ElementKind::Heading);
    let doc_before = session.document.clone();
    let history_before = session.history().len();

    let mailer = StubMailer::default();
    session.send_test(&mailer, "me@example.com").unwrap();

    assert_eq!(&*mailer.test_sends.borrow(), &["me@example.com"]);
    assert_eq!(session.document, doc_before);
    assert_eq!(session.history().len(), history_before);
}

#[test]
fn test_failed_save_does_not_corrupt_state() {
    struct FailingStore;
    impl letterpress_editor::DocumentStore for FailingStore {
        fn load(
            &self,
            id: &str,
        ) -> Result<(Document, Metadata), letterpress_editor::StoreError> {
            Err(letterpress_editor::StoreError::NotFound(id.to_string()))
        }
        fn save(
            &mut self,
            _id: &str,
            _doc: &Document,
            _meta: &Metadata,
        ) -> Result<(), letterpress_editor::StoreError> {
            Err(letterpress_editor::StoreError::Transport(
                "connection reset".to_string(),
            ))
        }
    }

    let mut session = blank_session();
    insert(&mut session, ElementKind::Heading);
    let doc_before = session.document.clone();

    let result = session.save(&mut FailingStore);
    assert!(matches!(result, Err(EditorError::Store(_))));

    // Recoverable by retry: in-memory state is untouched.
    assert_eq!(session.document, doc_before);
    assert!(session.is_dirty());
    assert!(session.can_undo());
}
