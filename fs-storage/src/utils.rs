use data_error::{Result, VaultError};

/// Keys double as file names, so only a conservative character set is
/// accepted. Leading dots are reserved for temporary files.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(VaultError::InvalidKey(key.to_owned()))
    }
}

/// Number of bytes a key-value pair occupies against a quota.
pub fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
