//! Registered user command handlers

use clap::Subcommand;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use super::{bulk_delete, delete_record, export_records, list_records, require_admin, ListArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum UsersCommand {
    /// List registered users
    List(ListArgs),
    /// Show the number of registrations
    Count,
    /// Export every user to CSV
    Export,
    /// Delete one user
    Delete { id: String },
    /// Delete every registered user
    DeleteAll {
        /// Must be exactly DELETE
        #[arg(long)]
        confirm: Option<String>,
    },
}

pub async fn handle(services: &ServiceFactory, command: UsersCommand) -> Result<()> {
    require_admin(services)?;
    let users = services.user_service.clone();

    match command {
        UsersCommand::List(args) => list_records(users, &args).await,
        UsersCommand::Count => {
            println!("{} registered user(s)", users.count().await?);
            Ok(())
        }
        UsersCommand::Export => export_records(users, &services.settings.export.output_dir).await,
        UsersCommand::Delete { id } => delete_record(users, &id).await,
        UsersCommand::DeleteAll { confirm } => bulk_delete(users, confirm).await,
    }
}
