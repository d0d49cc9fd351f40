//! Package, PIN and recharge pack command handlers

use clap::{Args, Subcommand};
use crate::models::{CreatePackageRequest, RechargePackRequest, UpdatePackageRequest};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use super::{delete_record, export_records, list_records, require_admin, ListArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum PackagesCommand {
    /// List packages (no login needed)
    List(ListArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        /// Registrations for this package become VIP members
        #[arg(long)]
        vip: bool,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        vip: Option<bool>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: String },
    Export,
    /// Registration PINs
    #[command(subcommand)]
    Pins(PinsCommand),
    /// Recharge packs
    #[command(subcommand)]
    Recharge(RechargeCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum PinsCommand {
    List(ListArgs),
    /// Generate PINs for a package
    Generate {
        #[arg(long)]
        package: String,
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Used/unused totals
    Stats,
    Delete { id: String },
    Export,
}

#[derive(Args, Debug, Clone)]
pub struct RechargeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub amount: f64,
    #[arg(long)]
    pub validity_days: Option<u32>,
    #[arg(long)]
    pub description: Option<String>,
}

impl From<RechargeArgs> for RechargePackRequest {
    fn from(args: RechargeArgs) -> Self {
        RechargePackRequest {
            name: args.name,
            amount: args.amount,
            validity_days: args.validity_days,
            description: args.description,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum RechargeCommand {
    List(ListArgs),
    Create(RechargeArgs),
    Update {
        id: String,
        #[command(flatten)]
        pack: RechargeArgs,
    },
    Delete { id: String },
}

pub async fn handle(services: &ServiceFactory, command: PackagesCommand) -> Result<()> {
    let packages = services.package_service.clone();

    match command {
        PackagesCommand::List(args) => list_records(packages, &args).await,
        PackagesCommand::Create { name, price, description, vip } => {
            require_admin(services)?;
            let request = CreatePackageRequest { name, price, description, is_vip: vip };
            let package = packages.create(&request).await?;
            println!("Created package {} ({})", package.name, package.id);
            Ok(())
        }
        PackagesCommand::Update { id, name, price, description, vip, active } => {
            require_admin(services)?;
            let request = UpdatePackageRequest {
                name,
                price,
                description,
                is_vip: vip,
                is_active: active,
            };
            let package = packages.update(&id, &request).await?;
            println!("Updated package {} ({})", package.name, package.id);
            Ok(())
        }
        PackagesCommand::Delete { id } => {
            require_admin(services)?;
            delete_record(packages, &id).await
        }
        PackagesCommand::Export => {
            require_admin(services)?;
            export_records(packages, &services.settings.export.output_dir).await
        }
        PackagesCommand::Pins(cmd) => handle_pins(services, cmd).await,
        PackagesCommand::Recharge(cmd) => handle_recharge(services, cmd).await,
    }
}

async fn handle_pins(services: &ServiceFactory, command: PinsCommand) -> Result<()> {
    require_admin(services)?;
    let pins = services.pin_service.clone();

    match command {
        PinsCommand::List(args) => list_records(pins, &args).await,
        PinsCommand::Generate { package, count } => {
            let generated = pins.generate(&package, count).await?;
            for pin in &generated {
                println!("{}", pin.code);
            }
            println!("Generated {} PIN(s)", generated.len());
            Ok(())
        }
        PinsCommand::Stats => {
            let stats = pins.stats().await?;
            println!("total={} used={} unused={}", stats.total, stats.used, stats.unused);
            Ok(())
        }
        PinsCommand::Delete { id } => delete_record(pins, &id).await,
        PinsCommand::Export => export_records(pins, &services.settings.export.output_dir).await,
    }
}

async fn handle_recharge(services: &ServiceFactory, command: RechargeCommand) -> Result<()> {
    let packs = services.recharge_service.clone();

    match command {
        RechargeCommand::List(args) => list_records(packs, &args).await,
        RechargeCommand::Create(args) => {
            require_admin(services)?;
            let pack = packs.create(&args.into()).await?;
            println!("Created recharge pack {} ({})", pack.name, pack.id);
            Ok(())
        }
        RechargeCommand::Update { id, pack } => {
            require_admin(services)?;
            let updated = packs.update(&id, &pack.into()).await?;
            println!("Updated recharge pack {} ({})", updated.name, updated.id);
            Ok(())
        }
        RechargeCommand::Delete { id } => {
            require_admin(services)?;
            delete_record(packs, &id).await
        }
    }
}
