use std::sync::Arc;

use chrono::Utc;

use crate::item::{ItemUpdate, VaultItem};
use crate::profile::Profile;
use crate::state::VaultState;
use crate::store::VaultStore;
use data_error::{Result, VaultError};
use fs_storage::KeyValueStore;

/// Owner of the current vault snapshot and of the store it is
/// persisted to.
///
/// Every mutation installs a new snapshot and then writes it through
/// the store, including mutations that turn out to be no-ops. A failed
/// write does not roll the snapshot back: the in-memory state stays
/// authoritative for the session and the failure is kept in
/// [`Vault::last_save_error`].
pub struct Vault<S: KeyValueStore> {
    store: VaultStore<S>,
    state: Arc<VaultState>,
    last_save_error: Option<VaultError>,
}

impl<S: KeyValueStore> Vault<S> {
    /// Load the vault from `store`, falling back to the default state
    /// when nothing usable is stored.
    pub fn open(store: VaultStore<S>) -> Self {
        let state = store.load().into_state();
        Self::with_state(store, state)
    }

    /// Start from an explicit state. Nothing is written until the first
    /// mutation.
    pub fn with_state(store: VaultStore<S>, state: VaultState) -> Self {
        Self {
            store,
            state: Arc::new(state),
            last_save_error: None,
        }
    }

    /// The current snapshot. It stays valid and unchanged after further
    /// mutations.
    pub fn snapshot(&self) -> Arc<VaultState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &VaultState {
        &self.state
    }

    pub fn items(&self) -> &[VaultItem] {
        self.state.items()
    }

    pub fn profile(&self) -> &Profile {
        self.state.profile()
    }

    pub fn store(&self) -> &VaultStore<S> {
        &self.store
    }

    pub fn into_store(self) -> VaultStore<S> {
        self.store
    }

    /// The error of the most recent write, if it failed.
    pub fn last_save_error(&self) -> Option<&VaultError> {
        self.last_save_error.as_ref()
    }

    /// Whether the most recent write made it to the store.
    pub fn is_persisted(&self) -> bool {
        self.last_save_error.is_none()
    }

    /// Add a new unlocked item at the front of the list and return its
    /// id. Title and content are taken as given.
    pub fn add_item(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        image: Option<String>,
    ) -> String {
        let item =
            VaultItem::new(title.into(), content.into(), image, Utc::now());
        let id = item.id().to_owned();
        let next = self.state.with_item_added(item);
        self.commit(next);
        id
    }

    pub fn toggle_lock(&mut self, id: &str) {
        let next = self.state.with_lock_toggled(id);
        self.commit(next);
    }

    pub fn delete_item(&mut self, id: &str) {
        let next = self.state.with_item_removed(id);
        self.commit(next);
    }

    pub fn update_item(&mut self, id: &str, update: ItemUpdate) {
        let next = self.state.with_item_updated(id, &update, Utc::now());
        self.commit(next);
    }

    pub fn set_profile(&mut self, profile: Profile) {
        let next = self.state.with_profile(profile);
        self.commit(next);
    }

    /// Erase the persisted blob and start over from the default state.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.state = Arc::new(VaultState::default());
        self.last_save_error = None;
        log::info!("Vault state erased");
        Ok(())
    }

    fn commit(&mut self, next: VaultState) {
        self.state = Arc::new(next);
        match self.store.save(&self.state) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                log::error!("Error saving vault state: {}", err);
                self.last_save_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fs_storage::MemoryStorage;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::store::LoadOutcome;

    /// Counts writes on top of an in-memory storage.
    struct CountingStorage {
        inner: MemoryStorage,
        writes: usize,
    }

    impl CountingStorage {
        fn new() -> Self {
            Self {
                inner: MemoryStorage::new("count".to_owned()),
                writes: 0,
            }
        }
    }

    impl KeyValueStore for CountingStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.writes += 1;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    fn memory_vault() -> Vault<MemoryStorage> {
        Vault::open(VaultStore::new(MemoryStorage::new("test".to_owned())))
    }

    fn reopen(vault: Vault<MemoryStorage>) -> Vault<MemoryStorage> {
        Vault::open(vault.into_store())
    }

    #[test]
    fn add_item_puts_new_item_first() {
        let mut vault = memory_vault();
        vault.add_item("old", "1", None);
        let id = vault.add_item("T", "C", None);

        let first = &vault.items()[0];
        assert_eq!(first.id(), id);
        assert_eq!(first.title(), "T");
        assert_eq!(first.created_at(), first.updated_at());
        assert!(!first.is_locked());
        assert_eq!(vault.items().len(), 2);
    }

    #[test]
    fn update_item_advances_only_updated_at() {
        let mut vault = memory_vault();
        let id = vault.add_item("T", "C", None);
        let before = vault.state().find(&id).unwrap().clone();

        vault.update_item(&id, ItemUpdate::default().title("X"));
        let after = vault.state().find(&id).unwrap();

        assert_eq!(after.title(), "X");
        assert_eq!(after.content(), "C");
        assert_eq!(after.created_at(), before.created_at());
        assert!(after.updated_at() >= before.updated_at());
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut vault = memory_vault();
        vault.add_item("T", "C", None);
        let before = vault.snapshot();

        vault.update_item("missing", ItemUpdate::default().title("X"));
        assert_eq!(*vault.snapshot(), *before);
    }

    #[test]
    fn toggle_lock_flips_only_the_flag() {
        let mut vault = memory_vault();
        let id = vault.add_item("T", "C", None);
        let before = vault.state().find(&id).unwrap().clone();

        vault.toggle_lock(&id);
        let after = vault.state().find(&id).unwrap();
        assert!(after.is_locked());
        assert_eq!(after.updated_at(), before.updated_at());
        assert_eq!(after.title(), before.title());

        vault.toggle_lock(&id);
        assert_eq!(vault.state().find(&id).unwrap(), &before);
    }

    #[test]
    fn delete_item_removes_exactly_one() {
        let mut vault = memory_vault();
        let id = vault.add_item("a", "1", None);
        vault.add_item("b", "2", None);

        vault.delete_item("missing");
        assert_eq!(vault.items().len(), 2);

        vault.delete_item(&id);
        assert_eq!(vault.items().len(), 1);
        assert!(!vault.state().contains(&id));
    }

    #[test]
    fn snapshots_are_not_mutated() {
        let mut vault = memory_vault();
        let id = vault.add_item("a", "1", None);
        let snapshot = vault.snapshot();

        vault.toggle_lock(&id);
        vault.set_profile(Profile::new("Ada", None));

        assert!(!snapshot.items()[0].is_locked());
        assert!(!snapshot.profile().is_configured());
        assert!(vault.profile().is_configured());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut vault = Vault::open(VaultStore::new(CountingStorage::new()));
        assert_eq!(vault.store().storage().writes, 0);

        let id = vault.add_item("a", "1", None);
        vault.toggle_lock(&id);
        vault.update_item(&id, ItemUpdate::default().content("2"));
        vault.set_profile(Profile::new("Ada", None));
        vault.delete_item("missing");
        vault.toggle_lock("missing");
        vault.delete_item(&id);

        assert_eq!(vault.store().storage().writes, 7);
        assert!(vault.is_persisted());

        let stored = vault.store().storage().inner.get("vault_items").unwrap();
        assert!(stored.is_some());
    }

    #[test_log::test]
    fn write_failures_keep_memory_state() {
        let storage = MemoryStorage::with_quota("tiny".to_owned(), 64);
        let mut vault = Vault::open(VaultStore::new(storage));

        let id = vault.add_item("a title", "content far too long to fit", None);
        assert!(!vault.is_persisted());
        assert!(vault
            .last_save_error()
            .map_or(false, VaultError::is_quota_exceeded));
        assert!(vault.state().contains(&id));

        // Nothing made it to storage, so a restart starts over
        let reloaded = Vault::open(vault.into_store());
        assert!(reloaded.items().is_empty());
    }

    #[test]
    fn successful_write_clears_previous_failure() {
        let storage = MemoryStorage::with_quota("small".to_owned(), 400);
        let mut vault = Vault::open(VaultStore::new(storage));

        let id = vault.add_item("t", "x".repeat(400), None);
        assert!(!vault.is_persisted());

        vault.delete_item(&id);
        assert!(vault.is_persisted());
    }

    #[test]
    fn reset_forgets_everything() {
        let mut vault = memory_vault();
        vault.set_profile(Profile::new("Ada", None));
        vault.add_item("a", "1", None);

        vault.reset().unwrap();
        assert_eq!(vault.state(), &VaultState::default());
        assert!(matches!(vault.store().load(), LoadOutcome::Missing));
    }

    #[test]
    fn state_survives_reopen() {
        let mut vault = memory_vault();
        vault.set_profile(Profile::new("Ada", None));
        let id = vault.add_item("Passport", "1234", None);
        vault.toggle_lock(&id);
        let expected = vault.snapshot();

        let vault = reopen(vault);
        assert_eq!(*vault.snapshot(), *expected);
        assert!(matches!(vault.store().load(), LoadOutcome::Restored(_)));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add,
        Toggle(usize),
        Delete(usize),
        Update(usize),
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            let index = usize::arbitrary(g);
            match u8::arbitrary(g) % 4 {
                0 => Op::Add,
                1 => Op::Toggle(index),
                2 => Op::Delete(index),
                _ => Op::Update(index),
            }
        }
    }

    /// Picks an existing id most of the time, and a missing one otherwise.
    fn pick(vault: &Vault<MemoryStorage>, index: usize) -> String {
        let items = vault.items();
        if items.is_empty() || index % 5 == 0 {
            "missing".to_owned()
        } else {
            items[index % items.len()].id().to_owned()
        }
    }

    #[quickcheck]
    fn ids_stay_unique_and_stamps_ordered(ops: Vec<Op>) -> bool {
        let mut vault = memory_vault();
        for op in ops {
            match op {
                Op::Add => {
                    vault.add_item("t", "c", None);
                }
                Op::Toggle(i) => {
                    let id = pick(&vault, i);
                    vault.toggle_lock(&id);
                }
                Op::Delete(i) => {
                    let id = pick(&vault, i);
                    vault.delete_item(&id);
                }
                Op::Update(i) => {
                    let id = pick(&vault, i);
                    vault.update_item(&id, ItemUpdate::default().title("u"));
                }
            }
        }

        let items = vault.items();
        let mut ids: Vec<_> = items.iter().map(|item| item.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == items.len()
            && items
                .iter()
                .all(|item| item.updated_at() >= item.created_at())
    }
}
