pub mod base_storage;
pub mod file_storage;
pub mod memory_storage;
mod utils;

pub use base_storage::KeyValueStore;
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

pub const VAULT_FOLDER: &str = ".vault";
