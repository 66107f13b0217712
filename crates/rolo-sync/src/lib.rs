pub mod auth;
pub mod error;
pub mod remote;
pub mod webhook;
pub mod xlsx;

pub use error::{Result, SyncError};
