use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::item::{ItemUpdate, VaultItem};
use crate::profile::Profile;

/// The whole persisted vault: items, newest first, and the profile.
///
/// Values are never modified in place. Every transition below returns a
/// new state and leaves `self` untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VaultState {
    items: Vec<VaultItem>,
    profile: Profile,
}

impl VaultState {
    /// Items must have unique ids; callers inside the crate guarantee it.
    pub(crate) fn from_parts(items: Vec<VaultItem>, profile: Profile) -> Self {
        Self { items, profile }
    }

    pub fn items(&self) -> &[VaultItem] {
        &self.items
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&VaultItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Items whose title or content contains `query`, ignoring case,
    /// in list order. An empty query yields every item.
    pub fn search<'a>(
        &'a self,
        query: &str,
    ) -> impl Iterator<Item = &'a VaultItem> + 'a {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(move |item| item.matches(&needle))
    }

    pub fn with_item_added(&self, item: VaultItem) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(item);
        items.extend(self.items.iter().cloned());
        Self {
            items,
            profile: self.profile.clone(),
        }
    }

    pub fn with_lock_toggled(&self, id: &str) -> Self {
        self.map_item(id, VaultItem::with_lock_toggled)
    }

    pub fn with_item_removed(&self, id: &str) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
            profile: self.profile.clone(),
        }
    }

    pub fn with_item_updated(
        &self,
        id: &str,
        update: &ItemUpdate,
        now: DateTime<Utc>,
    ) -> Self {
        self.map_item(id, |item| item.with_update(update, now))
    }

    pub fn with_profile(&self, profile: Profile) -> Self {
        Self {
            items: self.items.clone(),
            profile,
        }
    }

    fn map_item(&self, id: &str, f: impl Fn(&VaultItem) -> VaultItem) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id() == id {
                        f(item)
                    } else {
                        item.clone()
                    }
                })
                .collect(),
            profile: self.profile.clone(),
        }
    }
}
