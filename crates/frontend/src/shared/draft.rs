//! Edit-buffer state machine for create/edit forms.
//!
//! The draft is held apart from the committed collection: field edits
//! never leak into the store, and a failed submission keeps the buffer
//! intact so the user can correct and retry. Create and edit mode share
//! the same path; the presence of the record identity in the buffer is
//! what decides POST versus PUT at the call site.

use contracts::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    Empty,
    Editing,
    Submitting,
}

#[derive(Debug, Clone)]
pub struct Draft<T> {
    phase: DraftPhase,
    buffer: Option<T>,
}

impl<T> Default for Draft<T> {
    fn default() -> Self {
        Self {
            phase: DraftPhase::Empty,
            buffer: None,
        }
    }
}

impl<T: Validate + Clone> Draft<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == DraftPhase::Submitting
    }

    pub fn buffer(&self) -> Option<&T> {
        self.buffer.as_ref()
    }

    /// Begin editing from an empty template or an existing record.
    pub fn start(&mut self, seed: T) {
        self.buffer = Some(seed);
        self.phase = DraftPhase::Editing;
    }

    /// Update one or more fields. Ignored outside of `Editing`, so a
    /// stray input event cannot modify an in-flight submission.
    pub fn set(&mut self, edit: impl FnOnce(&mut T)) {
        if self.phase != DraftPhase::Editing {
            return;
        }
        if let Some(buffer) = self.buffer.as_mut() {
            edit(buffer);
        }
    }

    pub fn validate(&self) -> Vec<&'static str> {
        self.buffer
            .as_ref()
            .map(|b| b.missing_required())
            .unwrap_or_default()
    }

    /// Gate to the transport layer: hands out a payload only when the
    /// draft is editable and valid, otherwise reports the violations
    /// and stays in `Editing`.
    pub fn begin_submit(&mut self) -> Result<T, Vec<&'static str>> {
        if self.phase != DraftPhase::Editing {
            return Err(Vec::new());
        }
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(violations);
        }
        match self.buffer.clone() {
            Some(payload) => {
                self.phase = DraftPhase::Submitting;
                Ok(payload)
            }
            None => Err(Vec::new()),
        }
    }

    /// The commit settled and the store has reconciled; drop the draft.
    pub fn submit_succeeded(&mut self) {
        self.buffer = None;
        self.phase = DraftPhase::Empty;
    }

    /// The commit failed; keep the buffer unchanged for a retry.
    pub fn submit_failed(&mut self) {
        if self.phase == DraftPhase::Submitting {
            self.phase = DraftPhase::Editing;
        }
    }

    pub fn discard(&mut self) {
        self.buffer = None;
        self.phase = DraftPhase::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::Collection;
    use contracts::items::CatalogItem;

    fn editing(description: &str) -> Draft<CatalogItem> {
        let mut draft = Draft::new();
        draft.start(CatalogItem {
            description: description.to_string(),
            ..CatalogItem::default()
        });
        draft
    }

    #[test]
    fn invalid_draft_is_refused_and_stays_editable() {
        let mut draft = editing("");
        let outcome = draft.begin_submit();
        assert_eq!(outcome, Err(vec!["description"]));
        assert_eq!(draft.phase(), DraftPhase::Editing);
    }

    #[test]
    fn valid_draft_hands_out_payload_and_locks() {
        let mut draft = editing("Consulting");
        let payload = draft.begin_submit().unwrap();
        assert_eq!(payload.description, "Consulting");
        assert!(draft.is_submitting());
        // A second submit while in flight is refused.
        assert!(draft.begin_submit().is_err());
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let mut draft = editing("Consulting");
        let _ = draft.begin_submit().unwrap();
        draft.set(|b| b.description = "changed".to_string());
        assert_eq!(draft.buffer().unwrap().description, "Consulting");
    }

    #[test]
    fn failure_preserves_the_buffer_for_retry() {
        let mut draft = editing("Consulting");
        let _ = draft.begin_submit().unwrap();
        draft.submit_failed();
        assert_eq!(draft.phase(), DraftPhase::Editing);
        assert_eq!(draft.buffer().unwrap().description, "Consulting");
    }

    #[test]
    fn success_clears_the_draft() {
        let mut draft = editing("Consulting");
        let _ = draft.begin_submit().unwrap();
        draft.submit_succeeded();
        assert_eq!(draft.phase(), DraftPhase::Empty);
        assert!(draft.buffer().is_none());
    }

    #[test]
    fn draft_edits_never_touch_the_committed_collection() {
        let mut collection: Collection<CatalogItem> = Collection::new();
        collection.begin_load();
        collection
            .finish_load(Ok(vec![CatalogItem {
                id: Some(1),
                description: "Original".to_string(),
                ..CatalogItem::default()
            }]))
            .unwrap();
        let before = collection.records();

        let mut draft = Draft::new();
        draft.start(collection.get(1).cloned().unwrap());
        draft.set(|b| b.description = "Edited".to_string());
        draft.set(|b| b.gst_rate = 28.0);

        assert_eq!(collection.records(), before);
    }
}
