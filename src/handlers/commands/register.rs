//! Registration command handler

use std::path::PathBuf;
use clap::Args;
use tracing::warn;
use crate::forms::{FileUpload, RegistrationForm, SuccessModal};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    /// 10-digit mobile number
    #[arg(long)]
    pub phone: String,
    /// 12-digit Aadhaar number
    #[arg(long)]
    pub aadhaar: String,
    #[arg(long)]
    pub pan: Option<String>,
    /// Package id
    #[arg(long)]
    pub package: String,
    #[arg(long)]
    pub pin: String,
    /// Selfie image (JPEG, PNG or WebP, up to 5 MB)
    #[arg(long)]
    pub selfie: PathBuf,
}

impl RegisterArgs {
    pub async fn into_form(self) -> Result<RegistrationForm> {
        let selfie = FileUpload::from_path(&self.selfie).await?;
        Ok(RegistrationForm {
            name: self.name,
            phone_number: self.phone,
            aadhaar_number: self.aadhaar,
            pan_number: self.pan.unwrap_or_default(),
            package_id: self.package,
            pin: self.pin,
            selfie: Some(selfie),
        })
    }
}

/// Handle `register`
pub async fn handle_register(services: &ServiceFactory, args: RegisterArgs) -> Result<()> {
    let form = args.into_form().await?;
    match services.user_service.register(&form).await {
        Ok(result) => {
            println!("{}", SuccessModal::for_result(&result).render());
            Ok(())
        }
        Err(error) => {
            if let Some(fields) = error.field_errors() {
                warn!(fields = fields.len(), "Registration rejected");
                for (field, message) in fields.iter() {
                    eprintln!("  {}: {}", field, message);
                }
            }
            Err(error)
        }
    }
}
