use crate::util::{format_item, CliVault};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show a single item")]
pub struct Show {
    #[clap(help = "ID of the item")]
    id: String,
}

impl Show {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let item = vault
            .state()
            .find(&self.id)
            .ok_or_else(|| AppError::ItemNotFound(self.id.clone()))?;
        println!("{}", format_item(item, true));
        Ok(())
    }
}
