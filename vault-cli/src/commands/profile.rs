use clap::Subcommand;
use vault_core::Profile as VaultProfile;

use crate::util::{optional_url, report_persistence, require_text, CliVault};
use crate::AppError;

/// Available commands for the `profile` subcommand
#[derive(Subcommand, Debug)]
pub enum Profile {
    Set(Set),
    Show(Show),
}

impl Profile {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        match self {
            Profile::Set(set) => set.run(vault),
            Profile::Show(show) => show.run(vault),
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "set", about = "Set the profile name and avatar")]
pub struct Set {
    #[clap(short, long, help = "Your name")]
    name: String,
    #[clap(short, long, help = "Profile picture URL")]
    avatar: Option<String>,
}

impl Set {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let name = require_text("Name", &self.name)?;
        let profile =
            VaultProfile::new(name, optional_url(self.avatar.as_deref()));

        vault.set_profile(profile);
        report_persistence(vault);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show the profile")]
pub struct Show {}

impl Show {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let profile = vault.profile();
        if !profile.is_configured() {
            return Err(AppError::ProfileNotConfigured);
        }

        println!("{}", profile.name);
        println!("Avatar: {}", profile.avatar);
        println!("{} items in vault", vault.items().len());
        Ok(())
    }
}
