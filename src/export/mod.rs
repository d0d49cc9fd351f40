//! Tabular export
//!
//! Records that render as rows, shared by the CSV exporter and the admin tables.

pub mod csv;
pub mod table;

pub use self::csv::{to_csv, write_csv};
pub use table::render_table;

use crate::models::{
    GalleryItem, Lottery, Package, Participant, Pin, RechargePack, Registrant, VipMember,
};
use crate::utils::helpers::format_timestamp;

/// A record with a fixed column layout
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    value.map(format_timestamp).unwrap_or_default()
}

impl Tabular for Registrant {
    fn headers() -> Vec<&'static str> {
        vec![
            "Name", "Phone Number", "Aadhaar Number", "PAN", "Coupon Code", "Package",
            "VIP Status", "Selfie", "Registered At",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.phone_number.clone(),
            self.aadhaar_number.clone(),
            opt(&self.pan_number),
            opt(&self.coupon_code),
            self.package.as_ref().map(|p| p.label().to_string()).unwrap_or_default(),
            opt(&self.vip_status),
            opt(&self.selfie),
            date(&self.created_at),
        ]
    }
}

impl Tabular for Lottery {
    fn headers() -> Vec<&'static str> {
        vec!["Event", "Package", "Status", "Round", "Participants", "Winner", "Created At"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.event_name.clone(),
            opt(&self.package),
            self.status.to_string(),
            self.current_round.to_string(),
            self.total_participants.to_string(),
            self.winner.as_ref().map(|w| w.name.clone()).unwrap_or_default(),
            date(&self.created_at),
        ]
    }
}

impl Tabular for Participant {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Status", "Eliminated In Round", "Selfie"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.to_string(),
            self.eliminated_round.map(|r| r.to_string()).unwrap_or_default(),
            opt(&self.selfie),
        ]
    }
}

impl Tabular for VipMember {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Phone Number", "Coupon Code", "Referral Code", "Referred By", "Referrals", "Joined At"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            opt(&self.phone_number),
            self.coupon_code.clone(),
            opt(&self.referral_code),
            opt(&self.referred_by),
            self.referral_count.to_string(),
            date(&self.created_at),
        ]
    }
}

impl Tabular for Pin {
    fn headers() -> Vec<&'static str> {
        vec!["PIN", "Package", "Used", "Used By", "Created At"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.package.as_ref().map(|p| p.label().to_string()).unwrap_or_default(),
            if self.is_used { "yes" } else { "no" }.to_string(),
            opt(&self.used_by),
            date(&self.created_at),
        ]
    }
}

impl Tabular for Package {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Price", "VIP", "Active", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format!("{:.2}", self.price),
            if self.is_vip { "yes" } else { "no" }.to_string(),
            if self.is_active { "yes" } else { "no" }.to_string(),
            opt(&self.description),
        ]
    }
}

impl Tabular for RechargePack {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Amount", "Validity (days)", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format!("{:.2}", self.amount),
            self.validity_days.map(|d| d.to_string()).unwrap_or_default(),
            opt(&self.description),
        ]
    }
}

impl Tabular for GalleryItem {
    fn headers() -> Vec<&'static str> {
        vec!["Caption", "Image", "Uploaded At"]
    }

    fn cells(&self) -> Vec<String> {
        vec![opt(&self.caption), self.image_url.clone(), date(&self.created_at)]
    }
}
