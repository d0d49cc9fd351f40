//! Gallery command handlers

use std::path::PathBuf;
use clap::Subcommand;
use crate::forms::FileUpload;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use super::{delete_record, list_records, require_admin, ListArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum GalleryCommand {
    List(ListArgs),
    Upload {
        path: PathBuf,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Change an image caption
    Caption { id: String, caption: String },
    Delete { id: String },
}

pub async fn handle(services: &ServiceFactory, command: GalleryCommand) -> Result<()> {
    let gallery = services.gallery_service.clone();

    match command {
        GalleryCommand::List(args) => list_records(gallery, &args).await,
        GalleryCommand::Upload { path, caption } => {
            require_admin(services)?;
            let image = FileUpload::from_path(&path).await?;
            let item = gallery.upload(image, caption.as_deref()).await?;
            println!("Uploaded {} ({})", item.image_url, item.id);
            Ok(())
        }
        GalleryCommand::Caption { id, caption } => {
            require_admin(services)?;
            let item = gallery.update_caption(&id, &caption).await?;
            println!("Caption updated for {}", item.id);
            Ok(())
        }
        GalleryCommand::Delete { id } => {
            require_admin(services)?;
            delete_record(gallery, &id).await
        }
    }
}
