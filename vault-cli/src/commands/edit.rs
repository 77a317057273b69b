use vault_core::ItemUpdate;

use super::ensure_item;
use crate::util::{optional_url, report_persistence, require_text, CliVault};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "edit", about = "Change the title, content or image of an item")]
pub struct Edit {
    #[clap(help = "ID of the item")]
    id: String,
    #[clap(short, long, help = "New title")]
    title: Option<String>,
    #[clap(short, long, help = "New content")]
    content: Option<String>,
    #[clap(short, long, conflicts_with = "no_image", help = "New image URL")]
    image: Option<String>,
    #[clap(long, action, help = "Remove the image")]
    no_image: bool,
}

impl Edit {
    fn update(&self) -> Result<ItemUpdate, AppError> {
        let mut update = ItemUpdate::default();
        if let Some(title) = &self.title {
            update = update.title(require_text("Title", title)?);
        }
        if let Some(content) = &self.content {
            update = update.content(require_text("Content", content)?);
        }
        if self.no_image {
            update = update.image(None);
        } else if let Some(image) = &self.image {
            update = update.image(optional_url(Some(image.as_str())));
        }

        if update.is_empty() {
            Err(AppError::NothingToUpdate)
        } else {
            Ok(update)
        }
    }

    pub fn run(&self, vault: &mut CliVault) -> Result<(), AppError> {
        let update = self.update()?;
        ensure_item(vault, &self.id)?;

        vault.update_item(&self.id, update);
        report_persistence(vault);
        Ok(())
    }
}
