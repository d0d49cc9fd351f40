//! VIP portal and VIP administration command handlers

use clap::Subcommand;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::format_timestamp;
use super::{delete_record, export_records, list_records, prompt, require_admin, ListArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum VipCommand {
    /// Check a coupon code and whether it already has a password
    Verify { coupon: String },
    /// Set the first password for a coupon code
    SetPassword {
        coupon: String,
        #[arg(long, env = "RETAIL_CHAMPIONS_VIP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Login {
        coupon: String,
        #[arg(long, env = "RETAIL_CHAMPIONS_VIP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show the logged-in member's profile
    Profile,
    /// Members who joined with your referral code
    Referrals,
    /// Generate your referral code
    GenerateReferral,
    /// Admin: list VIP members
    Members(ListArgs),
    /// Admin: export VIP members to CSV
    Export,
    /// Admin: delete a VIP member
    Delete { id: String },
}

pub async fn handle(services: &ServiceFactory, command: VipCommand) -> Result<()> {
    let vip = services.vip_service.clone();

    match command {
        VipCommand::Verify { coupon } => {
            let verification = vip.verify_coupon(&coupon).await?;
            if !verification.valid {
                println!("Coupon code is not valid.");
            } else if verification.has_password {
                println!("Coupon verified. Log in with `vip login {}`.", coupon.trim());
            } else {
                println!("Coupon verified. Set a password with `vip set-password {}`.", coupon.trim());
            }
            Ok(())
        }
        VipCommand::SetPassword { coupon, password } => {
            let confirm = prompt("Confirm password: ").await?;
            let message = vip.set_password(&coupon, &password, &confirm).await?;
            println!("{}", message.unwrap_or_else(|| "Password set.".to_string()));
            Ok(())
        }
        VipCommand::Login { coupon, password } => {
            let member = vip.login(&coupon, &password).await?;
            println!("Welcome, {}!", member.name);
            Ok(())
        }
        VipCommand::Logout => {
            vip.logout()?;
            println!("Logged out.");
            Ok(())
        }
        VipCommand::Profile => {
            services.guard.require_vip()?;
            let member = vip.profile().await?;
            println!("Name:          {}", member.name);
            println!("Coupon code:   {}", member.coupon_code);
            println!("Referral code: {}", member.referral_code.as_deref().unwrap_or("-"));
            println!("Referrals:     {}", member.referral_count);
            if let Some(tier) = &member.tier {
                println!("Tier:          {}", tier);
            }
            Ok(())
        }
        VipCommand::Referrals => {
            services.guard.require_vip()?;
            let referrals = vip.referrals().await?;
            if referrals.is_empty() {
                println!("No referrals yet.");
            }
            for referral in &referrals.items {
                let joined = referral.joined_at.map(format_timestamp).unwrap_or_default();
                println!("{:<30} {}", referral.name, joined);
            }
            Ok(())
        }
        VipCommand::GenerateReferral => {
            services.guard.require_vip()?;
            println!("Your referral code: {}", vip.generate_referral().await?);
            Ok(())
        }
        VipCommand::Members(args) => {
            require_admin(services)?;
            list_records(vip, &args).await
        }
        VipCommand::Export => {
            require_admin(services)?;
            export_records(vip, &services.settings.export.output_dir).await
        }
        VipCommand::Delete { id } => {
            require_admin(services)?;
            delete_record(vip, &id).await
        }
    }
}
