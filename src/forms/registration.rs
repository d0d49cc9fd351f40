//! Contest registration form
//!
//! Validates registrant input, builds the multipart body and picks the
//! success modal for the response.

use reqwest::multipart::Form;
use crate::models::RegistrationResult;
use crate::utils::errors::Result;
use super::schema::{FieldSchema, FileUpload, FormData, FormSchema};

// ASCII digits only; `\d` in `regex` also matches other Unicode digits
pub const PHONE_PATTERN: &str = r"^[6-9][0-9]{9}$";
pub const AADHAAR_PATTERN: &str = r"^[0-9]{12}$";
pub const PAN_PATTERN: &str = r"^[A-Z]{5}[0-9]{4}[A-Z]$";
pub const MAX_SELFIE_BYTES: u64 = 5 * 1024 * 1024;
pub const SELFIE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub phone_number: String,
    pub aadhaar_number: String,
    /// Optional; omitted from the request when empty
    pub pan_number: String,
    pub package_id: String,
    pub pin: String,
    pub selfie: Option<FileUpload>,
}

impl RegistrationForm {
    pub fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSchema::new("name", "Name").required().length(2, 50),
            FieldSchema::new("phoneNumber", "Phone number")
                .required()
                .pattern(PHONE_PATTERN, "Enter a valid 10-digit mobile number"),
            FieldSchema::new("aadhaarNumber", "Aadhaar number")
                .required()
                .pattern(AADHAAR_PATTERN, "Aadhaar number must be 12 digits"),
            FieldSchema::new("panNumber", "PAN")
                .pattern(PAN_PATTERN, "Enter a valid PAN (e.g. ABCDE1234F)"),
            FieldSchema::new("package", "Package").required(),
            FieldSchema::new("pin", "PIN").required(),
            FieldSchema::new("selfie", "Selfie")
                .required()
                .max_file_size(MAX_SELFIE_BYTES)
                .accept(&SELFIE_TYPES),
        ])
    }

    fn form_data(&self) -> FormData {
        FormData::new()
            .text("name", &self.name)
            .text("phoneNumber", &self.phone_number)
            .text("aadhaarNumber", &self.aadhaar_number)
            .text("panNumber", &self.pan_number.trim().to_uppercase())
            .text("package", &self.package_id)
            .text("pin", &self.pin)
            .file("selfie", self.selfie.clone())
    }

    /// Validate against the registration schema
    pub fn validate(&self) -> Result<()> {
        Self::schema().check(&self.form_data())
    }

    /// Text fields sent with the request, in submission order
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.trim().to_string()),
            ("phoneNumber", self.phone_number.trim().to_string()),
            ("aadhaarNumber", self.aadhaar_number.trim().to_string()),
        ];
        let pan = self.pan_number.trim();
        if !pan.is_empty() {
            fields.push(("panNumber", pan.to_uppercase()));
        }
        fields.push(("package", self.package_id.trim().to_string()));
        fields.push(("pin", self.pin.trim().to_string()));
        fields
    }

    /// Build the multipart body
    pub fn to_multipart(&self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        if let Some(selfie) = &self.selfie {
            form = form.part("selfie", selfie.to_part()?);
        }
        Ok(form)
    }
}

/// Modal shown after a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessModal {
    /// Green checkmark
    Standard { coupon_code: Option<String> },
    /// Gold VIP badge
    Vip { coupon_code: Option<String> },
}

impl SuccessModal {
    pub fn for_result(result: &RegistrationResult) -> Self {
        let coupon_code = result.coupon().map(str::to_string);
        if result.is_vip() {
            SuccessModal::Vip { coupon_code }
        } else {
            SuccessModal::Standard { coupon_code }
        }
    }

    pub fn is_vip(&self) -> bool {
        matches!(self, SuccessModal::Vip { .. })
    }

    pub fn render(&self) -> String {
        match self {
            SuccessModal::Standard { coupon_code } => {
                let mut text = "\u{2714} Registration successful!".to_string();
                if let Some(code) = coupon_code {
                    text.push_str(&format!("\nYour coupon code: {}", code));
                }
                text
            }
            SuccessModal::Vip { coupon_code } => {
                let mut text = "\u{2605} Welcome to the VIP club! Registration successful.".to_string();
                if let Some(code) = coupon_code {
                    text.push_str(&format!("\nUse coupon code {} to sign in to your VIP profile.", code));
                }
                text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::RetailChampionsError;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Ravi Kumar".to_string(),
            phone_number: "9876543210".to_string(),
            aadhaar_number: "123456789012".to_string(),
            pan_number: String::new(),
            package_id: "pkg-silver".to_string(),
            pin: "4821".to_string(),
            selfie: Some(FileUpload::new("me.jpg", "image/jpeg", vec![0xff; 128])),
        }
    }

    #[test]
    fn test_valid_form_with_empty_pan() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_invalid_phone_is_field_error() {
        let mut form = valid_form();
        form.phone_number = "5876543210".to_string();
        match form.validate() {
            Err(RetailChampionsError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains("phoneNumber"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_aadhaar_rejected() {
        let mut form = valid_form();
        form.aadhaar_number = "12345678901".to_string();
        let err = form.validate().unwrap_err();
        assert!(err.field_errors().unwrap().contains("aadhaarNumber"));
    }

    #[test]
    fn test_pan_included_only_when_present() {
        let form = valid_form();
        assert!(!form.text_fields().iter().any(|(name, _)| *name == "panNumber"));

        let mut with_pan = valid_form();
        with_pan.pan_number = " abcde1234f ".to_string();
        assert!(with_pan.validate().is_ok());
        assert!(with_pan
            .text_fields()
            .contains(&("panNumber", "ABCDE1234F".to_string())));

        with_pan.pan_number = "ABCD1234F".to_string();
        let err = with_pan.validate().unwrap_err();
        assert!(err.field_errors().unwrap().contains("panNumber"));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        let mut form = valid_form();
        form.phone_number = format!("9{}", "\u{0663}".repeat(9));
        form.aadhaar_number = "\u{0967}".repeat(12);
        let err = form.validate().unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains("phoneNumber"));
        assert!(fields.contains("aadhaarNumber"));
    }

    #[test]
    fn test_missing_selfie() {
        let mut form = valid_form();
        form.selfie = None;
        assert_eq!(
            form.validate().unwrap_err().field_errors().unwrap().get("selfie"),
            Some("Selfie is required")
        );
    }

    #[test]
    fn test_success_modal_branches() {
        let standard = RegistrationResult {
            vip_status: Some("none".to_string()),
            coupon_code: Some("RC-100".to_string()),
            user: None,
        };
        let modal = SuccessModal::for_result(&standard);
        assert!(!modal.is_vip());
        assert!(modal.render().starts_with('\u{2714}'));

        let vip = RegistrationResult {
            vip_status: Some("vip".to_string()),
            ..standard
        };
        assert!(SuccessModal::for_result(&vip).is_vip());
    }
}
