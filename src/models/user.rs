//! Registrant model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Package reference, either a bare id or the populated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        name: String,
    },
}

impl PackageRef {
    pub fn id(&self) -> &str {
        match self {
            PackageRef::Id(id) => id,
            PackageRef::Populated { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PackageRef::Id(id) => id,
            PackageRef::Populated { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub aadhaar_number: String,
    #[serde(default)]
    pub pan_number: Option<String>,
    #[serde(default)]
    pub selfie: Option<String>,
    #[serde(default)]
    pub aadhaar_image: Option<String>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub package: Option<PackageRef>,
    #[serde(default)]
    pub vip_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload of a successful registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    #[serde(default)]
    pub user: Option<Registrant>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub vip_status: Option<String>,
}

impl RegistrationResult {
    /// VIP status from the payload, falling back to the embedded user record
    pub fn is_vip(&self) -> bool {
        let status = self
            .vip_status
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.vip_status.as_deref()));
        status == Some("vip")
    }

    pub fn coupon(&self) -> Option<&str> {
        self.coupon_code
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.coupon_code.as_deref()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCount {
    #[serde(alias = "total")]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_ref_variants() {
        let bare: PackageRef = serde_json::from_str(r#""pkg1""#).unwrap();
        assert_eq!(bare.id(), "pkg1");

        let full: PackageRef = serde_json::from_str(r#"{"_id": "pkg2", "name": "Gold"}"#).unwrap();
        assert_eq!(full.id(), "pkg2");
        assert_eq!(full.label(), "Gold");
    }

    #[test]
    fn test_vip_status_falls_back_to_user() {
        let json = r#"{"user": {"_id": "u1", "name": "Ravi", "phoneNumber": "9876543210",
                        "aadhaarNumber": "123412341234", "vipStatus": "vip", "couponCode": "RC-1"}}"#;
        let result: RegistrationResult = serde_json::from_str(json).unwrap();
        assert!(result.is_vip());
        assert_eq!(result.coupon(), Some("RC-1"));
    }

    #[test]
    fn test_non_vip_status() {
        let result: RegistrationResult = serde_json::from_str(r#"{"vipStatus": "none"}"#).unwrap();
        assert!(!result.is_vip());
    }
}
