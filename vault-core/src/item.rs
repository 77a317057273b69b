use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note kept in the vault.
///
/// `is_locked` is a display flag only: locked items stay readable and
/// editable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItem {
    id: String,
    title: String,
    content: String,
    #[serde(default)]
    is_locked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl VaultItem {
    /// Create an unlocked item with a fresh random id.
    pub fn new(
        title: String,
        content: String,
        image: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            content,
            is_locked: false,
            created_at: now,
            updated_at: now,
            image,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Case-insensitive substring match against title or content.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }

    pub(crate) fn with_lock_toggled(&self) -> Self {
        Self {
            is_locked: !self.is_locked,
            ..self.clone()
        }
    }

    /// Merge `update` into a copy of this item and stamp it.
    ///
    /// The stamp never moves backwards, even if `now` is earlier than
    /// the previous one.
    pub(crate) fn with_update(
        &self,
        update: &ItemUpdate,
        now: DateTime<Utc>,
    ) -> Self {
        let mut next = self.clone();
        if let Some(title) = &update.title {
            next.title = title.clone();
        }
        if let Some(content) = &update.content {
            next.content = content.clone();
        }
        if let Some(image) = &update.image {
            next.image = image.clone();
        }
        next.updated_at = now.max(self.updated_at);
        next
    }

    /// Repair an item read from storage whose stamps are out of order.
    /// Returns `true` if anything was changed.
    pub(crate) fn clamp_timestamps(&mut self) -> bool {
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
            true
        } else {
            false
        }
    }
}

/// Partial edit of a [`VaultItem`]. Fields left as `None` are kept.
///
/// `image` distinguishes "keep" (`None`), "clear" (`Some(None)`) and
/// "replace" (`Some(Some(url))`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<Option<String>>,
}

impl ItemUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image.is_none()
    }
}
