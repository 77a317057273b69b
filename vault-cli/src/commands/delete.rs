use super::ensure_item;
use crate::util::{report_persistence, CliVault};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "delete", about = "Delete an item")]
pub struct Delete {
    #[clap(help = "ID of the item")]
    id: String,
}

impl Delete {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        ensure_item(vault, &self.id)?;
        vault.delete_item(&self.id);
        report_persistence(vault);
        Ok(())
    }
}
