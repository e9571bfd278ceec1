//! Note collection controller.
//!
//! Owns the authoritative in-memory note list, the compose/edit draft, and the
//! local pin flags, and exposes one handler per user intent. Every remote
//! mutation follows the same discipline: validate locally, call the service,
//! and merge only on success — a failed call leaves `notes` and `draft`
//! exactly as they were before it, and the error is surfaced unchanged.
//!
//! Handlers take the collection by `&mut` across the await, so two mutations
//! can never interleave their validate/merge windows on the same collection.

use std::collections::HashMap;

use crate::api::NoteService;
use crate::error::ServiceResult;
use crate::models::{Draft, Note, NoteId, NoteInput};

/// Result of an add/save attempt that may be rejected by local validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOutcome {
    /// The round trip succeeded and the collection was updated
    Saved,
    /// The draft failed local validation; no remote call was made
    Rejected,
}

/// The user's answer to the delete confirmation prompt.
///
/// The confirmation step is part of the delete contract: a `Cancelled`
/// decision must reach the handler so it can record that nothing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Confirmed,
    Cancelled,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The note was deleted remotely and removed from the collection
    Deleted,
    /// The user declined the confirmation; no remote call was made
    Declined,
}

/// Authoritative client-side note state.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    /// Notes as last confirmed by the data service, in service order
    pub notes: Vec<Note>,
    /// The single compose/edit draft
    pub draft: Draft,
    /// Local-only pin flags, keyed by note id; lost on restart
    pins: HashMap<NoteId, bool>,
}

impl NoteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized input for the compose form, if the draft is composing and
    /// valid. Editing drafts and blank content yield `None`.
    #[must_use]
    pub fn compose_input(&self) -> Option<NoteInput> {
        if self.draft.editing_target().is_some() {
            return None;
        }
        self.draft.to_input()
    }

    /// Normalized input plus target id for the edit form, if the draft is
    /// editing and valid.
    #[must_use]
    pub fn edit_input(&self) -> Option<(NoteId, NoteInput)> {
        let id = self.draft.editing_target()?.clone();
        Some((id, self.draft.to_input()?))
    }

    /// Replace the authoritative list wholesale after a successful fetch.
    pub fn apply_listed(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Merge a successful create: append and reset the draft.
    pub fn apply_created(&mut self, note: Note) {
        self.notes.push(note);
        self.draft.reset();
    }

    /// Merge a successful update: replace the matching entry in place,
    /// preserving every other entry's position, and reset the draft.
    pub fn apply_updated(&mut self, note: Note) {
        if let Some(entry) = self.notes.iter_mut().find(|entry| entry.id == note.id) {
            *entry = note;
        }
        self.draft.reset();
    }

    /// Merge a successful delete: remove the matching entry and its pin flag.
    ///
    /// If the deleted note was the draft's edit target, the draft is reset as
    /// well, so the form never references a note that no longer exists.
    pub fn apply_deleted(&mut self, id: &NoteId) {
        self.notes.retain(|note| &note.id != id);
        self.pins.remove(id);
        if self.draft.editing_target() == Some(id) {
            self.draft.reset();
        }
    }

    /// Switch the draft to editing the given note, pre-populated from it.
    ///
    /// Always allowed; any prior unsaved draft is discarded without
    /// confirmation. The authoritative entry is untouched until save.
    pub fn begin_edit(&mut self, note: &Note) {
        self.draft = Draft::for_note(note);
    }

    /// Discard the draft and return to the empty composing state. Local only.
    pub fn cancel_edit(&mut self) {
        self.draft.reset();
    }

    /// Flip the local pin flag for a note. Local only, never fails.
    pub fn toggle_pin(&mut self, id: &NoteId) {
        let flag = self.pins.entry(id.clone()).or_insert(false);
        *flag = !*flag;
    }

    /// Whether a note is currently pinned.
    #[must_use]
    pub fn is_pinned(&self, id: &NoteId) -> bool {
        self.pins.get(id).copied().unwrap_or(false)
    }

    /// Presentation order: pinned notes first, then the rest; within each
    /// group, authoritative list order. A stable partition, not a re-sort.
    #[must_use]
    pub fn display_order(&self) -> Vec<&Note> {
        let (pinned, unpinned): (Vec<&Note>, Vec<&Note>) = self
            .notes
            .iter()
            .partition(|note| self.is_pinned(&note.id));
        pinned.into_iter().chain(unpinned).collect()
    }

    /// Fetch the full list once and replace the collection contents.
    pub async fn refresh<S: NoteService>(&mut self, service: &S) -> ServiceResult<()> {
        let notes = service.list_notes().await?;
        tracing::info!("Loaded {} notes from the data service", notes.len());
        self.apply_listed(notes);
        Ok(())
    }

    /// Handle the add intent: create the composed note remotely, then append.
    pub async fn add<S: NoteService>(&mut self, service: &S) -> ServiceResult<DraftOutcome> {
        let Some(input) = self.compose_input() else {
            return Ok(DraftOutcome::Rejected);
        };
        let created = service.create_note(&input).await?;
        self.apply_created(created);
        Ok(DraftOutcome::Saved)
    }

    /// Handle the save-edit intent: update the target remotely, then replace
    /// it in place.
    pub async fn save_edit<S: NoteService>(&mut self, service: &S) -> ServiceResult<DraftOutcome> {
        let Some((id, input)) = self.edit_input() else {
            return Ok(DraftOutcome::Rejected);
        };
        let updated = service.update_note(&id, &input).await?;
        self.apply_updated(updated);
        Ok(DraftOutcome::Saved)
    }

    /// Handle the delete intent. The user's confirmation decision is part of
    /// the call; a cancelled decision performs no remote work at all.
    pub async fn delete<S: NoteService>(
        &mut self,
        service: &S,
        id: &NoteId,
        decision: DeleteDecision,
    ) -> ServiceResult<DeleteOutcome> {
        if decision == DeleteDecision::Cancelled {
            return Ok(DeleteOutcome::Declined);
        }
        service.delete_note(id).await?;
        self.apply_deleted(id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ServiceError;
    use crate::models::DraftMode;

    /// In-memory stand-in for the data service; counts calls and can be
    /// switched into a failing mode.
    #[derive(Default)]
    struct FakeService {
        records: Mutex<Vec<Note>>,
        next_id: AtomicU64,
        calls: AtomicU64,
        failing: AtomicBool,
    }

    impl FakeService {
        fn seeded(notes: Vec<Note>) -> Self {
            Self {
                records: Mutex::new(notes),
                ..Self::default()
            }
        }

        fn fail_next_calls(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        fn call_count(&self) -> u64 {
            self.calls.load(Ordering::SeqCst)
        }

        fn check_failure(&self) -> ServiceResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(ServiceError::Api("service unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl NoteService for FakeService {
        async fn list_notes(&self) -> ServiceResult<Vec<Note>> {
            self.check_failure()?;
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create_note(&self, input: &NoteInput) -> ServiceResult<Note> {
            self.check_failure()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let note = Note {
                id: NoteId::new(format!("srv-{id}")),
                header: input.header.clone(),
                content: input.content.clone(),
                tags: input.tags.clone(),
            };
            self.records.lock().unwrap().push(note.clone());
            Ok(note)
        }

        async fn update_note(&self, id: &NoteId, input: &NoteInput) -> ServiceResult<Note> {
            self.check_failure()?;
            let mut records = self.records.lock().unwrap();
            let entry = records
                .iter_mut()
                .find(|note| &note.id == id)
                .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
            entry.header.clone_from(&input.header);
            entry.content.clone_from(&input.content);
            entry.tags.clone_from(&input.tags);
            Ok(entry.clone())
        }

        async fn delete_note(&self, id: &NoteId) -> ServiceResult<()> {
            self.check_failure()?;
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|note| &note.id != id);
            if records.len() == before {
                return Err(ServiceError::NotFound(id.to_string()));
            }
            Ok(())
        }
    }

    fn note(id: &str, content: &str) -> Note {
        Note {
            id: NoteId::new(id),
            header: None,
            content: content.to_string(),
            tags: vec![],
        }
    }

    fn seeded_collection(notes: Vec<Note>) -> (NoteCollection, FakeService) {
        let service = FakeService::seeded(notes.clone());
        let mut collection = NoteCollection::new();
        collection.apply_listed(notes);
        (collection, service)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_appends_one_note_with_trimmed_content_and_parsed_tags() {
        let (mut collection, service) = seeded_collection(vec![]);
        collection.draft.content = "  remember the milk  ".to_string();
        collection.draft.tags_input = "work, personal ,, urgent".to_string();

        let outcome = collection.add(&service).await.unwrap();

        assert_eq!(outcome, DraftOutcome::Saved);
        assert_eq!(collection.notes.len(), 1);
        assert_eq!(collection.notes[0].content, "remember the milk");
        assert_eq!(
            collection.notes[0].tags,
            vec!["work", "personal", "urgent"]
        );
        assert_eq!(collection.draft, Draft::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_with_whitespace_content_makes_no_remote_call() {
        let (mut collection, service) = seeded_collection(vec![note("n1", "keep")]);
        collection.draft.content = "   ".to_string();
        let before = collection.clone();

        let outcome = collection.add(&service).await.unwrap();

        assert_eq!(outcome, DraftOutcome::Rejected);
        assert_eq!(service.call_count(), 0);
        assert_eq!(collection.notes, before.notes);
        assert_eq!(collection.draft, before.draft);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn begin_edit_then_cancel_restores_empty_composing_draft() {
        let (mut collection, service) = seeded_collection(vec![note("n1", "original")]);
        let target = collection.notes[0].clone();
        let notes_before = collection.notes.clone();

        collection.begin_edit(&target);
        assert_eq!(
            collection.draft.mode,
            DraftMode::Editing(NoteId::new("n1"))
        );
        assert_eq!(collection.draft.content, "original");

        collection.cancel_edit();
        assert_eq!(collection.draft, Draft::default());
        assert_eq!(collection.notes, notes_before);
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_edit_replaces_only_the_matching_entry_in_place() {
        let (mut collection, service) = seeded_collection(vec![
            note("a", "first"),
            note("b", "second"),
            note("c", "third"),
        ]);
        let target = collection.notes[1].clone();
        collection.begin_edit(&target);
        collection.draft.content = "second, revised".to_string();

        let outcome = collection.save_edit(&service).await.unwrap();

        assert_eq!(outcome, DraftOutcome::Saved);
        assert_eq!(collection.notes[0], note("a", "first"));
        assert_eq!(collection.notes[1].id, NoteId::new("b"));
        assert_eq!(collection.notes[1].content, "second, revised");
        assert_eq!(collection.notes[2], note("c", "third"));
        assert_eq!(collection.draft, Draft::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_edit_with_blank_content_is_rejected_locally() {
        let (mut collection, service) = seeded_collection(vec![note("a", "first")]);
        let target = collection.notes[0].clone();
        collection.begin_edit(&target);
        collection.draft.content = " \n ".to_string();
        let draft_before = collection.draft.clone();

        let outcome = collection.save_edit(&service).await.unwrap();

        assert_eq!(outcome, DraftOutcome::Rejected);
        assert_eq!(service.call_count(), 0);
        assert_eq!(collection.draft, draft_before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn confirmed_delete_removes_exactly_the_matching_entry() {
        let (mut collection, service) =
            seeded_collection(vec![note("a", "first"), note("b", "second")]);

        let outcome = collection
            .delete(&service, &NoteId::new("a"), DeleteDecision::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(collection.notes, vec![note("b", "second")]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancelled_delete_makes_no_remote_call() {
        let (mut collection, service) =
            seeded_collection(vec![note("a", "first"), note("b", "second")]);
        let before = collection.notes.clone();

        let outcome = collection
            .delete(&service, &NoteId::new("a"), DeleteDecision::Cancelled)
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(service.call_count(), 0);
        assert_eq!(collection.notes, before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_the_edit_target_resets_the_draft() {
        let (mut collection, service) = seeded_collection(vec![note("a", "first")]);
        let target = collection.notes[0].clone();
        collection.begin_edit(&target);

        collection
            .delete(&service, &NoteId::new("a"), DeleteDecision::Confirmed)
            .await
            .unwrap();

        assert_eq!(collection.draft, Draft::default());
    }

    #[test]
    fn toggle_pin_twice_restores_the_original_value() {
        let (mut collection, _service) = seeded_collection(vec![note("a", "first")]);
        let id = NoteId::new("a");

        assert!(!collection.is_pinned(&id));
        collection.toggle_pin(&id);
        assert!(collection.is_pinned(&id));
        collection.toggle_pin(&id);
        assert!(!collection.is_pinned(&id));
    }

    #[test]
    fn display_order_is_a_stable_pinned_first_partition() {
        let (mut collection, _service) = seeded_collection(vec![
            note("a", "1"),
            note("b", "2"),
            note("c", "3"),
            note("d", "4"),
        ]);
        collection.toggle_pin(&NoteId::new("b"));

        let order: Vec<&str> = collection
            .display_order()
            .iter()
            .map(|note| note.id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_add_leaves_notes_and_draft_untouched() {
        let (mut collection, service) = seeded_collection(vec![note("a", "first")]);
        collection.draft.content = "new note".to_string();
        let notes_before = collection.notes.clone();
        let draft_before = collection.draft.clone();
        service.fail_next_calls();

        let error = collection.add(&service).await.unwrap_err();

        assert!(matches!(error, ServiceError::Api(_)));
        assert_eq!(collection.notes, notes_before);
        assert_eq!(collection.draft, draft_before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_save_edit_leaves_notes_and_draft_untouched() {
        let (mut collection, service) = seeded_collection(vec![note("a", "first")]);
        let target = collection.notes[0].clone();
        collection.begin_edit(&target);
        collection.draft.content = "revised".to_string();
        let notes_before = collection.notes.clone();
        let draft_before = collection.draft.clone();
        service.fail_next_calls();

        assert!(collection.save_edit(&service).await.is_err());
        assert_eq!(collection.notes, notes_before);
        assert_eq!(collection.draft, draft_before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_delete_leaves_notes_untouched() {
        let (mut collection, service) = seeded_collection(vec![note("a", "first")]);
        let before = collection.notes.clone();
        service.fail_next_calls();

        let result = collection
            .delete(&service, &NoteId::new("a"), DeleteDecision::Confirmed)
            .await;

        assert!(result.is_err());
        assert_eq!(collection.notes, before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_replaces_the_collection_wholesale() {
        let service = FakeService::seeded(vec![note("x", "one"), note("y", "two")]);
        let mut collection = NoteCollection::new();
        collection.apply_listed(vec![note("stale", "old")]);

        collection.refresh(&service).await.unwrap();

        assert_eq!(collection.notes, vec![note("x", "one"), note("y", "two")]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_while_editing_is_rejected() {
        let (mut collection, service) = seeded_collection(vec![note("a", "first")]);
        let target = collection.notes[0].clone();
        collection.begin_edit(&target);

        let outcome = collection.add(&service).await.unwrap();

        assert_eq!(outcome, DraftOutcome::Rejected);
        assert_eq!(service.call_count(), 0);
    }
}
