use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use fs_storage::{FileStorage, VAULT_FOLDER};
use home::home_dir;
use vault_core::{Vault, VaultItem, VaultStore};

use crate::AppError;

pub type CliVault = Vault<FileStorage>;

pub fn provide_root(root: &Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = root {
        Ok(path.clone())
    } else {
        Ok(home_dir()
            .ok_or(AppError::HomeDirNotFound)?
            .join(VAULT_FOLDER))
    }
}

pub fn open_vault(root: &Path) -> CliVault {
    log::debug!("Opening vault at {}", root.display());
    let storage = FileStorage::new("vault".to_owned(), root);
    Vault::open(VaultStore::new(storage))
}

/// Trimmed non-empty text, as the forms require for titles and names.
pub fn require_text(
    field: &'static str,
    value: &str,
) -> Result<String, AppError> {
    if value.trim().is_empty() {
        Err(AppError::EmptyField(field))
    } else {
        Ok(value.to_owned())
    }
}

/// An empty URL field means "no image".
pub fn optional_url(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
}

/// Tell the user when the last change only lives in memory.
pub fn report_persistence(vault: &CliVault) {
    if let Some(err) = vault.last_save_error() {
        eprintln!(
            "Warning: changes could not be saved and will be lost: {}",
            err
        );
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    DateTime::<Local>::from(date)
        .format("%b %e %H:%M %Y")
        .to_string()
}

pub fn format_item(item: &VaultItem, with_id: bool) -> String {
    let marker = if item.is_locked() { "[locked]" } else { "[open]" };
    let mut output = format!("{} {}", marker, item.title());
    if with_id {
        output.push_str(&format!(" ({})", item.id()));
    }
    output.push('\n');
    for line in item.content().lines() {
        output.push_str(&format!("    {}\n", line));
    }
    if let Some(image) = item.image().filter(|url| !url.is_empty()) {
        output.push_str(&format!("    Image: {}\n", image));
    }
    output.push_str(&format!(
        "    Created: {}\n    Updated: {}",
        format_date(item.created_at()),
        format_date(item.updated_at())
    ));
    output
}
