use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::item::VaultItem;
use crate::profile::{Profile, DEFAULT_AVATAR};
use crate::state::VaultState;
use data_error::{Result, VaultError};
use fs_storage::KeyValueStore;

/// Key under which the whole vault is persisted.
pub const STORAGE_KEY: &str = "vault_items";

/// What [`VaultStore::load`] found in the storage.
///
/// Every variant yields a usable state through
/// [`LoadOutcome::into_state`]; the variants only tell how it was
/// obtained.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Missing,
    /// The stored blob was well-formed.
    Restored(VaultState),
    /// The stored blob was partially malformed. Broken fields fell back
    /// to their defaults, one issue per fallback.
    Repaired {
        state: VaultState,
        issues: Vec<String>,
    },
    /// The storage could not be read, or the blob is not a vault.
    Unreadable { error: VaultError },
}

impl LoadOutcome {
    pub fn into_state(self) -> VaultState {
        match self {
            Self::Restored(state) | Self::Repaired { state, .. } => state,
            Self::Missing | Self::Unreadable { .. } => VaultState::default(),
        }
    }

    /// `true` unless something had to be repaired or discarded.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Missing | Self::Restored(_))
    }
}

/// Translates a [`VaultState`] to and from the single blob kept in a
/// [`KeyValueStore`].
pub struct VaultStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> VaultStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: STORAGE_KEY.to_owned(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted vault. Never fails: problems are reported
    /// through the returned [`LoadOutcome`] and logged.
    pub fn load(&self) -> LoadOutcome {
        let blob = match self.storage.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::debug!("No vault stored under {}", self.key);
                return LoadOutcome::Missing;
            }
            Err(error) => {
                log::error!("Error loading vault state: {}", error);
                return LoadOutcome::Unreadable { error };
            }
        };

        match decode(&blob) {
            Ok((state, issues)) if issues.is_empty() => {
                log::info!(
                    "Vault state loaded from {} with {} items",
                    self.key,
                    state.len()
                );
                LoadOutcome::Restored(state)
            }
            Ok((state, issues)) => {
                for issue in &issues {
                    log::warn!("Repaired vault state: {}", issue);
                }
                LoadOutcome::Repaired { state, issues }
            }
            Err(error) => {
                log::error!("Error loading vault state: {}", error);
                LoadOutcome::Unreadable { error }
            }
        }
    }

    /// Overwrite the persisted vault with `state`.
    pub fn save(&mut self, state: &VaultState) -> Result<()> {
        let blob = serde_json::to_string(state)?;
        self.storage.set(&self.key, &blob)?;
        log::debug!(
            "Vault state with {} items saved under {}",
            state.len(),
            self.key
        );
        Ok(())
    }

    /// Forget the persisted vault entirely.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(&self.key)
    }
}

/// Decode a stored blob field by field. Only a blob that is not a JSON
/// object at all is an error; anything else is patched up and the
/// fallbacks taken are returned alongside the state.
fn decode(blob: &str) -> Result<(VaultState, Vec<String>)> {
    let value: Value = serde_json::from_str(blob)?;
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(VaultError::Parse(format!(
                "expected a JSON object, found {}",
                kind(&other)
            )))
        }
    };

    let mut issues = Vec::new();
    let items = decode_items(object.get("items"), &mut issues);
    let profile = decode_profile(object.get("profile"), &mut issues);
    Ok((VaultState::from_parts(items, profile), issues))
}

fn decode_items(
    value: Option<&Value>,
    issues: &mut Vec<String>,
) -> Vec<VaultItem> {
    let elements = match value {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            issues.push(format!("items is {}, not an array", kind(other)));
            return Vec::new();
        }
        None => {
            issues.push("items is missing".to_owned());
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let mut item = match VaultItem::deserialize(element) {
            Ok(item) => item,
            Err(err) => {
                issues.push(format!("items[{}] dropped: {}", index, err));
                continue;
            }
        };
        if !seen.insert(item.id().to_owned()) {
            issues.push(format!(
                "items[{}] dropped: duplicate id {}",
                index,
                item.id()
            ));
            continue;
        }
        if item.clamp_timestamps() {
            issues.push(format!(
                "items[{}] updatedAt preceded createdAt",
                index
            ));
        }
        items.push(item);
    }
    items
}

fn decode_profile(
    value: Option<&Value>,
    issues: &mut Vec<String>,
) -> Profile {
    let empty = Map::new();
    let fields = match value {
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            issues.push(format!("profile is {}, not an object", kind(other)));
            &empty
        }
        None => {
            issues.push("profile is missing".to_owned());
            &empty
        }
    };

    // An empty name is a legitimate "not configured yet", an empty
    // avatar is not.
    let name = match fields.get("name") {
        Some(Value::String(name)) => name.clone(),
        _ => {
            issues.push("profile.name is missing".to_owned());
            String::new()
        }
    };
    let avatar = match fields.get("avatar") {
        Some(Value::String(avatar)) if !avatar.is_empty() => avatar.clone(),
        _ => {
            issues.push("profile.avatar is missing".to_owned());
            DEFAULT_AVATAR.to_owned()
        }
    };

    Profile { name, avatar }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
