use crate::util::{format_item, CliVault};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "List vault items, newest first")]
pub struct List {
    #[clap(
        short,
        long,
        help = "Only items whose title or content contains this text"
    )]
    search: Option<String>,
    #[clap(short = 'i', long = "ids", action, help = "Show items' IDs")]
    with_ids: bool,
}

impl List {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let query = self.search.as_deref().unwrap_or_default();
        let output: Vec<String> = vault
            .state()
            .search(query)
            .map(|item| format_item(item, self.with_ids))
            .collect();

        if output.is_empty() {
            println!("No items found");
        } else {
            println!("{}", output.join("\n\n"));
        }
        Ok(())
    }
}
