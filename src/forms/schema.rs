//! Declarative form validation
//!
//! A form is a set of named values checked against per-field rules at submit
//! time, before any network call is made.

use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{FieldErrors, RetailChampionsError, Result};

/// An uploaded file held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RetailChampionsError::InvalidInput(format!("Invalid file path: {}", path.display())))?
            .to_string();
        let mime_type = guess_mime_type(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Convert into a multipart part
    pub fn to_part(&self) -> Result<reqwest::multipart::Part> {
        reqwest::multipart::Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)
            .map_err(RetailChampionsError::Network)
    }
}

fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// A submitted form value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File(FileUpload),
}

/// Values keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.values.insert(field.to_string(), FieldValue::Text(value.to_string()));
        self
    }

    pub fn file(mut self, field: &str, file: Option<FileUpload>) -> Self {
        if let Some(file) = file {
            self.values.insert(field.to_string(), FieldValue::File(file));
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn text_value(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(FieldValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Rules applied to one field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldValidation {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub error_message: Option<String>,
    pub max_file_size: Option<u64>,
    pub accepted_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub validation: FieldValidation,
}

impl FieldSchema {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            validation: FieldValidation::default(),
        }
    }

    pub fn required(mut self) -> Self {
        self.validation.required = true;
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.validation.min_length = Some(min);
        self.validation.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: &str, message: &str) -> Self {
        self.validation.pattern = Some(pattern.to_string());
        self.validation.error_message = Some(message.to_string());
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.validation.max_file_size = Some(bytes);
        self
    }

    pub fn accept(mut self, mime_types: &[&str]) -> Self {
        self.validation.accepted_types = mime_types.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// Ordered set of field schemas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Validate a form, collecting the first error of every failing field
    pub fn validate(&self, data: &FormData) -> Result<FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            if let Some(message) = validate_field(field, data.get(&field.name))? {
                errors.add(&field.name, message);
            }
        }
        Ok(errors)
    }

    /// Validate and fail with the collected field errors
    pub fn check(&self, data: &FormData) -> Result<()> {
        self.validate(data)?.into_result()
    }
}

fn validate_field(field: &FieldSchema, value: Option<&FieldValue>) -> Result<Option<String>> {
    let rules = &field.validation;

    match value {
        None => Ok(required_message(field)),
        Some(FieldValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(required_message(field));
            }

            let length = text.chars().count();
            if let Some(min_length) = rules.min_length {
                if length < min_length {
                    return Ok(Some(format!("{} must be at least {} characters", field.label, min_length)));
                }
            }
            if let Some(max_length) = rules.max_length {
                if length > max_length {
                    return Ok(Some(format!("{} must be at most {} characters", field.label, max_length)));
                }
            }

            if let Some(pattern) = &rules.pattern {
                let regex = regex::Regex::new(pattern)
                    .map_err(|_| RetailChampionsError::Config(format!("Invalid regex pattern for {}", field.name)))?;
                if !regex.is_match(text) {
                    return Ok(Some(
                        rules
                            .error_message
                            .clone()
                            .unwrap_or_else(|| format!("{} format is invalid", field.label)),
                    ));
                }
            }

            Ok(None)
        }
        Some(FieldValue::File(file)) => {
            if let Some(max_size) = rules.max_file_size {
                if file.size() > max_size {
                    return Ok(Some(format!(
                        "{} must be smaller than {} MB",
                        field.label,
                        max_size / (1024 * 1024)
                    )));
                }
            }
            if !rules.accepted_types.is_empty() && !rules.accepted_types.contains(&file.mime_type) {
                return Ok(Some(format!(
                    "{} must be one of: {}",
                    field.label,
                    rules.accepted_types.join(", ")
                )));
            }
            Ok(None)
        }
    }
}

fn required_message(field: &FieldSchema) -> Option<String> {
    if field.validation.required {
        Some(format!("{} is required", field.label))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSchema::new("name", "Name").required().length(2, 10),
            FieldSchema::new("code", "Code").pattern(r"^[A-Z]{3}$", "Code must be three capitals"),
            FieldSchema::new("photo", "Photo")
                .required()
                .max_file_size(10)
                .accept(&["image/png"]),
        ])
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = schema().validate(&FormData::new()).unwrap();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("photo"), Some("Photo is required"));
        assert!(!errors.contains("code"));
    }

    #[test]
    fn test_length_and_pattern() {
        let data = FormData::new()
            .text("name", "A")
            .text("code", "abc")
            .file("photo", Some(FileUpload::new("a.png", "image/png", vec![0; 4])));
        let errors = schema().validate(&data).unwrap();
        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters"));
        assert_eq!(errors.get("code"), Some("Code must be three capitals"));
        assert!(!errors.contains("photo"));
    }

    #[test]
    fn test_file_rules() {
        let too_big = FormData::new()
            .text("name", "Ravi")
            .file("photo", Some(FileUpload::new("a.png", "image/png", vec![0; 11])));
        assert!(schema().validate(&too_big).unwrap().contains("photo"));

        let wrong_type = FormData::new()
            .text("name", "Ravi")
            .file("photo", Some(FileUpload::new("a.gif", "image/gif", vec![0; 2])));
        assert_eq!(
            schema().validate(&wrong_type).unwrap().get("photo"),
            Some("Photo must be one of: image/png")
        );
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("selfie.JPG"), "image/jpeg");
        assert_eq!(guess_mime_type("noext"), "application/octet-stream");
    }
}
