use clap::Parser;

mod cli;
mod commands;
mod error;
mod util;

use cli::Cli;
pub use error::AppError;
use util::{open_vault, provide_root};

fn run(args: &Cli) -> Result<(), AppError> {
    let root = provide_root(&args.root)?;
    let mut vault = open_vault(&root);
    args.command.run(&mut vault)
}

fn main() {
    env_logger::init();

    let args = Cli::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
