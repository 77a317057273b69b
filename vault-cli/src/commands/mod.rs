use clap::Subcommand;

use crate::util::CliVault;
use crate::AppError;

mod add;
mod delete;
mod edit;
mod list;
mod lock;
pub mod profile;
mod reset;
mod show;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Add(add::Add),
    List(list::List),
    Show(show::Show),
    Lock(lock::Lock),
    Edit(edit::Edit),
    Delete(delete::Delete),
    Reset(reset::Reset),
    #[command(about = "Manage the vault owner's profile")]
    Profile {
        #[clap(subcommand)]
        subcommand: profile::Profile,
    },
}

impl Commands {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        // Everything but profile setup waits for a configured profile
        let needs_profile =
            !matches!(self, Commands::Profile { .. } | Commands::Reset(_));
        if needs_profile && !vault.profile().is_configured() {
            return Err(AppError::ProfileNotConfigured);
        }

        match self {
            Commands::Add(add) => add.run(vault),
            Commands::List(list) => list.run(vault),
            Commands::Show(show) => show.run(vault),
            Commands::Lock(lock) => lock.run(vault),
            Commands::Edit(edit) => edit.run(vault),
            Commands::Delete(delete) => delete.run(vault),
            Commands::Reset(reset) => reset.run(vault),
            Commands::Profile { subcommand } => subcommand.run(vault),
        }
    }
}

/// Fail with [`AppError::ItemNotFound`] unless `id` is in the vault.
fn ensure_item(vault: &CliVault, id: &str) -> Result<(), AppError> {
    if vault.state().contains(id) {
        Ok(())
    } else {
        Err(AppError::ItemNotFound(id.to_owned()))
    }
}
