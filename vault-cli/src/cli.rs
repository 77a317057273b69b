use std::path::PathBuf;

use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "vault")]
#[clap(about = "Keep titled notes in a local vault", long_about = None)]
pub struct Cli {
    #[clap(
        long,
        global = true,
        value_parser,
        help = "Vault folder, defaults to ~/.vault"
    )]
    pub root: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Commands,
}
