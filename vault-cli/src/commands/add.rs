use crate::util::{optional_url, report_persistence, require_text, CliVault};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "add", about = "Add a new item to the vault")]
pub struct Add {
    #[clap(short, long, help = "Title of the item")]
    title: String,
    #[clap(short, long, help = "Content of the item")]
    content: String,
    #[clap(short, long, help = "Image URL (optional)")]
    image: Option<String>,
}

impl Add {
    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let title = require_text("Title", &self.title)?;
        let content = require_text("Content", &self.content)?;
        let image = optional_url(self.image.as_deref());

        let id = vault.add_item(title, content, image);
        report_persistence(vault);

        println!("{}", id);
        Ok(())
    }
}
