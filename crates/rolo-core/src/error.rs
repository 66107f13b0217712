use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("name is required")]
    EmptyName,
    #[error("email is required")]
    EmptyEmail,
    #[error("phone is required")]
    EmptyPhone,
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
