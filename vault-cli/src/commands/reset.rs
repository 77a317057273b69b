use crate::util::CliVault;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "reset", about = "Erase everything stored in the vault")]
pub struct Reset {}

impl Reset {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let count = vault.items().len();
        vault.reset()?;
        println!("Removed {} items", count);
        Ok(())
    }
}
