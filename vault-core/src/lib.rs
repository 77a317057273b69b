pub mod item;
pub mod profile;
pub mod state;
pub mod store;
pub mod vault;

pub use data_error::{Result, VaultError};
pub use item::{ItemUpdate, VaultItem};
pub use profile::{Profile, DEFAULT_AVATAR};
pub use state::VaultState;
pub use store::{LoadOutcome, VaultStore, STORAGE_KEY};
pub use vault::Vault;
