use data_error::Result;

/// A string-keyed, string-valued store scoped to a single origin.
///
/// Every value is written and replaced as a whole; there are no
/// partial updates of a value.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    /// An absent key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`.
    /// Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
