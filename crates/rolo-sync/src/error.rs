use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("spreadsheet error: {0}")]
    Sheet(#[from] calamine::Error),
    #[error("no header row found: expected a row with name, email, or phone columns")]
    HeaderNotFound,
    #[error("workbook contains no sheets")]
    EmptySheet,
    #[error("parse error: {0}")]
    Parse(String),
    #[cfg(feature = "remote")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "remote")]
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[cfg(feature = "remote")]
    #[error("authentication failed: {0}")]
    Auth(String),
    #[cfg(feature = "remote")]
    #[error("remote insert failed (status {status}): {message}")]
    Remote { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;
