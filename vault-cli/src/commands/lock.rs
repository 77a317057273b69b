use super::ensure_item;
use crate::util::{report_persistence, CliVault};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "lock", about = "Toggle the lock flag of an item")]
pub struct Lock {
    #[clap(help = "ID of the item")]
    id: String,
}

impl Lock {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        ensure_item(vault, &self.id)?;
        vault.toggle_lock(&self.id);
        report_persistence(vault);

        let locked = vault
            .state()
            .find(&self.id)
            .map_or(false, |item| item.is_locked());
        println!("{}", if locked { "Locked" } else { "Unlocked" });
        Ok(())
    }
}
