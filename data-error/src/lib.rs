use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error(
        "Storage quota exceeded: {label} needs {needed} bytes, \
         {available} available"
    )]
    QuotaExceeded {
        label: String,
        needed: usize,
        available: usize,
    },
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl VaultError {
    /// Whether the error comes from the storage running out of room,
    /// as opposed to the storage being unreachable or corrupt.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
