//! Forms and client-side validation

pub mod registration;
pub mod schema;

pub use registration::{RegistrationForm, SuccessModal};
pub use schema::{FieldSchema, FieldValidation, FieldValue, FileUpload, FormData, FormSchema};
