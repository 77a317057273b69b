use data_error::VaultError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't retrieve home directory!")]
    HomeDirNotFound,

    #[error(
        "Profile is not set up yet, \
         run `vault profile set --name <NAME>` first"
    )]
    ProfileNotConfigured,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error(
        "Nothing to update, pass at least one of \
         --title, --content, --image, --no-image"
    )]
    NothingToUpdate,

    #[error(transparent)]
    VaultError(#[from] VaultError),
}
