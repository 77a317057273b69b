use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::base_storage::KeyValueStore;
use crate::utils::validate_key;
use data_error::{Result, VaultError};

/// Key-value storage backed by a single directory.
///
/// Each key is a file inside the directory. A value is first written to
/// a temporary sibling file and then renamed over the destination, so
/// readers observe either the previous value or the new one.
pub struct FileStorage {
    label: String,
    root: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with a diagnostic label and the
    /// directory holding its entries. Nothing is touched on disk until
    /// the first write.
    pub fn new(label: String, root: &Path) -> Self {
        Self {
            label,
            root: PathBuf::from(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                log::debug!(
                    "{} read {} bytes for key {}",
                    self.label,
                    value.len(),
                    key
                );
                Ok(Some(value))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(VaultError::Storage(
                self.label.clone(),
                format!("Failed to read {}: {}", path.display(), err),
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root)?;

        let mut tmp = TmpFile::create_in(&self.root, key)?;
        tmp.file.write_all(value.as_bytes())?;
        tmp.persist(&path)?;

        log::info!(
            "{} {} bytes have been written for key {}",
            self.label,
            value.len(),
            key
        );
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("{} removed key {}", self.label, key);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(VaultError::Storage(self.label.clone(), err.to_string()))
            }
        }
    }
}

/// Scratch file that is deleted on drop unless it was persisted.
struct TmpFile {
    file: File,
    path: PathBuf,
    persisted: bool,
}

impl TmpFile {
    fn create_in(dir: &Path, key: &str) -> Result<Self> {
        let suffix: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(10)
            .collect();
        let path = dir.join(format!(".{}.{}.tmp", key, suffix));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        Ok(Self {
            file,
            path,
            persisted: false,
        })
    }

    fn persist(mut self, dest: &Path) -> Result<()> {
        self.file.sync_all()?;
        fs::rename(&self.path, dest)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TmpFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}
