//! Command handlers module
//!
//! One submodule per command family. [`handle_command`] dispatches a parsed
//! [`Command`] to its handler.

pub mod auth;
pub mod config;
pub mod gallery;
pub mod lottery;
pub mod packages;
pub mod register;
pub mod users;
pub mod vip;

use std::path::Path;
use clap::{Args, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use crate::admin::{AdminPanel, PanelSource};
use crate::api::{ListQuery, SortOrder};
use crate::export::write_csv;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// All available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in as an administrator
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RETAIL_CHAMPIONS_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored admin session
    Logout,
    /// Show the logged-in administrator
    Whoami,
    /// Submit a contest registration
    Register(register::RegisterArgs),
    /// Live draw and contest history
    #[command(subcommand)]
    Lottery(lottery::LotteryCommand),
    /// Registered users
    #[command(subcommand)]
    Users(users::UsersCommand),
    /// Packages, PINs and recharge packs
    #[command(subcommand)]
    Packages(packages::PackagesCommand),
    /// VIP member portal and administration
    #[command(subcommand)]
    Vip(vip::VipCommand),
    /// Gallery images
    #[command(subcommand)]
    Gallery(gallery::GalleryCommand),
    /// Inspect the effective configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Main command dispatcher
pub async fn handle_command(command: Command, services: ServiceFactory) -> Result<()> {
    match command {
        Command::Login { email, password } => auth::handle_login(&services, &email, &password).await,
        Command::Logout => auth::handle_logout(&services),
        Command::Whoami => auth::handle_whoami(&services),
        Command::Register(args) => register::handle_register(&services, args).await,
        Command::Lottery(cmd) => lottery::handle(&services, cmd).await,
        Command::Users(cmd) => users::handle(&services, cmd).await,
        Command::Packages(cmd) => packages::handle(&services, cmd).await,
        Command::Vip(cmd) => vip::handle(&services, cmd).await,
        Command::Gallery(cmd) => gallery::handle(&services, cmd).await,
        Command::Config(cmd) => config::handle(&services, cmd),
    }
}

/// Pagination, search and sort flags shared by the list commands
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
    /// Server-side search term
    #[arg(long)]
    pub search: Option<String>,
    /// Server-side sort field
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long)]
    pub asc: bool,
    /// Server-side filter, `key=value`; repeatable
    #[arg(long = "filter", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,
    /// Client-side filter over the fetched page
    #[arg(long)]
    pub grep: Option<String>,
    /// Client-side sort by column index
    #[arg(long)]
    pub column: Option<usize>,
}

impl ListArgs {
    pub fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::new().page(self.page).limit(self.limit);
        if let Some(search) = &self.search {
            query = query.search(search);
        }
        if let Some(sort) = &self.sort {
            query = query.sort(sort, self.order());
        }
        for (key, value) in &self.filters {
            query = query.filter(key, value);
        }
        query
    }

    fn order(&self) -> SortOrder {
        if self.asc {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

/// Fetch one page and print it as a table
pub(crate) async fn list_records<S: PanelSource>(source: S, args: &ListArgs) -> Result<()> {
    let mut panel = AdminPanel::with_query(source, args.to_query());
    panel.refresh().await?;
    if let Some(term) = &args.grep {
        panel.set_filter(term);
    }
    if let Some(column) = args.column {
        panel.sort_by_column(column, args.order());
    }
    print!("{}", panel.render());
    Ok(())
}

pub(crate) async fn delete_record<S: PanelSource>(source: S, id: &str) -> Result<()> {
    let message = source.delete_record(id).await?;
    println!("{}", message.unwrap_or_else(|| format!("Deleted {}", id)));
    Ok(())
}

/// Bulk delete, prompting for the confirmation text when none was passed
pub(crate) async fn bulk_delete<S: PanelSource>(source: S, confirm: Option<String>) -> Result<()> {
    let confirmation = match confirm {
        Some(text) => text,
        None => {
            prompt(&format!(
                "This permanently deletes all {}. Type DELETE to confirm: ",
                S::NAME.to_lowercase()
            ))
            .await?
        }
    };
    let mut panel = AdminPanel::new(source);
    let message = panel.bulk_delete(&confirmation).await?;
    println!("{}", message.unwrap_or_else(|| format!("All {} deleted", S::NAME.to_lowercase())));
    Ok(())
}

/// Fetch every record and write it to a CSV file
pub(crate) async fn export_records<S: PanelSource>(source: S, dir: &Path) -> Result<()> {
    let page = source.fetch_page(&ListQuery::all()).await?;
    let stem = S::NAME.to_lowercase().replace(' ', "-");
    let path = write_csv(dir, &stem, &page.items).await?;
    println!("Exported {} record(s) to {}", page.len(), path.display());
    Ok(())
}

/// Print a prompt and read one trimmed line from stdin
pub(crate) async fn prompt(message: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn require_admin(services: &ServiceFactory) -> Result<()> {
    services.guard.require_admin().map(|_| ())
}
