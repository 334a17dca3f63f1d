//! In-memory representation of a server-owned record collection.
//!
//! The server is the source of truth: entries exist here only as the
//! result of a settled fetch or a settled mutation. Optimistically
//! inserted records carry a `Pending` correlation key until the server
//! assigns the permanent identity.

use uuid::Uuid;

use crate::shared::api_client::RequestError;

pub trait Identified {
    fn record_id(&self) -> Option<i64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Entry identity: the server id once persisted, or a client-local
/// correlation key while a creation is in flight. The pending key is
/// never promoted to a permanent identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Persisted(i64),
    Pending(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub key: EntryKey,
    pub value: T,
}

#[derive(Debug, Clone)]
pub struct Collection<T> {
    entries: Vec<Entry<T>>,
    phase: LoadPhase,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            phase: LoadPhase::Idle,
        }
    }
}

impl<T: Identified + Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    pub fn records(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.key == EntryKey::Persisted(id))
            .map(|e| &e.value)
    }

    /// Pure read-side projection over the collection; never mutates.
    pub fn project(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.entries
            .iter()
            .filter(|e| keep(&e.value))
            .map(|e| e.value.clone())
            .collect()
    }

    pub fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// Apply a settled fetch. Success replaces the collection wholesale
    /// in server order (last-settled-wins); failure leaves the entries
    /// untouched and only raises the failure flag, so the collection is
    /// never partially populated. The failure is handed back so the
    /// caller can notify the user.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<T>, RequestError>,
    ) -> Result<(), RequestError> {
        match result {
            Ok(records) => {
                self.entries = records
                    .into_iter()
                    .map(|value| Entry {
                        key: match value.record_id() {
                            Some(id) => EntryKey::Persisted(id),
                            None => EntryKey::Pending(Uuid::new_v4()),
                        },
                        value,
                    })
                    .collect();
                self.phase = LoadPhase::Ready;
                Ok(())
            }
            Err(e) => {
                self.phase = LoadPhase::Failed;
                Err(e)
            }
        }
    }

    /// Append a server-confirmed record.
    pub fn insert(&mut self, value: T) {
        let key = match value.record_id() {
            Some(id) => EntryKey::Persisted(id),
            None => EntryKey::Pending(Uuid::new_v4()),
        };
        self.entries.push(Entry { key, value });
    }

    /// Append an optimistic placeholder and return its correlation key.
    pub fn insert_pending(&mut self, value: T) -> Uuid {
        let key = Uuid::new_v4();
        self.entries.push(Entry {
            key: EntryKey::Pending(key),
            value,
        });
        key
    }

    /// Swap a placeholder for the server-confirmed record, in place.
    /// If the placeholder is gone (e.g. a refetch settled in between),
    /// the confirmed record is appended instead of being dropped.
    pub fn reconcile_pending(&mut self, pending: Uuid, value: T) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.key == EntryKey::Pending(pending))
        {
            Some(entry) => {
                entry.key = match value.record_id() {
                    Some(id) => EntryKey::Persisted(id),
                    None => EntryKey::Pending(pending),
                };
                entry.value = value;
            }
            None => self.insert(value),
        }
    }

    /// Drop an optimistic placeholder after a failed creation,
    /// restoring the collection to its pre-mutation state.
    pub fn discard_pending(&mut self, pending: Uuid) {
        self.entries.retain(|e| e.key != EntryKey::Pending(pending));
    }

    /// Swap the matching persisted entry in place after an update.
    pub fn replace(&mut self, id: i64, value: T) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.key == EntryKey::Persisted(id))
        {
            entry.value = value;
        }
    }

    /// Remove by server identity after a confirmed delete.
    pub fn remove(&mut self, id: i64) {
        self.entries.retain(|e| e.key != EntryKey::Persisted(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: Option<i64>,
        name: String,
    }

    impl Rec {
        fn persisted(id: i64, name: &str) -> Self {
            Self {
                id: Some(id),
                name: name.to_string(),
            }
        }

        fn draft(name: &str) -> Self {
            Self {
                id: None,
                name: name.to_string(),
            }
        }
    }

    impl Identified for Rec {
        fn record_id(&self) -> Option<i64> {
            self.id
        }
    }

    fn loaded(records: Vec<Rec>) -> Collection<Rec> {
        let mut c = Collection::new();
        c.begin_load();
        c.finish_load(Ok(records)).unwrap();
        c
    }

    #[test]
    fn load_is_idempotent() {
        let records = vec![Rec::persisted(1, "a"), Rec::persisted(2, "b")];
        let mut c = loaded(records.clone());
        let first = c.records();

        c.begin_load();
        c.finish_load(Ok(records)).unwrap();
        assert_eq!(c.records(), first);
        assert_eq!(c.phase(), LoadPhase::Ready);
    }

    #[test]
    fn load_preserves_server_order() {
        let c = loaded(vec![
            Rec::persisted(3, "c"),
            Rec::persisted(1, "a"),
            Rec::persisted(2, "b"),
        ]);
        let names: Vec<_> = c.records().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn failed_load_leaves_entries_untouched() {
        let mut c = loaded(vec![Rec::persisted(1, "a")]);
        c.begin_load();
        let _ = c.finish_load(Err(RequestError::Unexpected("offline".to_string())));
        assert_eq!(c.phase(), LoadPhase::Failed);
        assert_eq!(c.records(), vec![Rec::persisted(1, "a")]);
    }

    #[test]
    fn failed_first_load_is_empty_with_failure_flag() {
        let mut c: Collection<Rec> = Collection::new();
        c.begin_load();
        let _ = c.finish_load(Err(RequestError::Unexpected("offline".to_string())));
        assert!(c.is_empty());
        assert_eq!(c.phase(), LoadPhase::Failed);
    }

    #[test]
    fn failed_load_hands_back_the_error_for_notification() {
        let mut c: Collection<Rec> = Collection::new();
        c.begin_load();
        let err = RequestError::Unexpected("offline".to_string());
        assert_eq!(c.finish_load(Err(err.clone())), Err(err));
        assert!(!c.is_loading());
        // A successful load settles silently.
        c.begin_load();
        assert!(c.is_loading());
        assert_eq!(c.finish_load(Ok(vec![Rec::persisted(1, "a")])), Ok(()));
    }

    #[test]
    fn reconcile_swaps_placeholder_in_place() {
        let mut c = loaded(vec![Rec::persisted(1, "a")]);
        let key = c.insert_pending(Rec::draft("new"));
        assert_eq!(c.len(), 2);

        c.reconcile_pending(key, Rec::persisted(9, "new"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.entries()[1].key, EntryKey::Persisted(9));
        assert_eq!(c.get(9), Some(&Rec::persisted(9, "new")));
    }

    #[test]
    fn reconcile_after_refetch_appends_instead_of_dropping() {
        let mut c = loaded(vec![Rec::persisted(1, "a")]);
        let key = c.insert_pending(Rec::draft("new"));
        // A refetch settled meanwhile and replaced the collection.
        c.begin_load();
        c.finish_load(Ok(vec![Rec::persisted(1, "a")])).unwrap();

        c.reconcile_pending(key, Rec::persisted(9, "new"));
        assert_eq!(c.get(9), Some(&Rec::persisted(9, "new")));
    }

    #[test]
    fn discard_pending_restores_prior_state() {
        let mut c = loaded(vec![Rec::persisted(1, "a")]);
        let before = c.records();
        let key = c.insert_pending(Rec::draft("new"));
        c.discard_pending(key);
        assert_eq!(c.records(), before);
    }

    #[test]
    fn replace_swaps_matching_entry_only() {
        let mut c = loaded(vec![Rec::persisted(1, "a"), Rec::persisted(2, "b")]);
        c.replace(2, Rec::persisted(2, "b2"));
        assert_eq!(c.get(1), Some(&Rec::persisted(1, "a")));
        assert_eq!(c.get(2), Some(&Rec::persisted(2, "b2")));
    }

    #[test]
    fn remove_deletes_by_identity() {
        let mut c = loaded(vec![Rec::persisted(1, "a"), Rec::persisted(2, "b")]);
        c.remove(1);
        assert_eq!(c.records(), vec![Rec::persisted(2, "b")]);
        // Unknown id is a no-op.
        c.remove(42);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn projection_never_mutates() {
        let c = loaded(vec![Rec::persisted(1, "apple"), Rec::persisted(2, "pear")]);
        let hits = c.project(|r| r.name.contains("app"));
        assert_eq!(hits, vec![Rec::persisted(1, "apple")]);
        assert_eq!(c.len(), 2);
    }
}
