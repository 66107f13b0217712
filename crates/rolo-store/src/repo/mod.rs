pub mod contacts;
pub mod files;
pub mod session;

pub use contacts::ContactsRepo;
pub use files::{UploadedFile, UploadedFilesRepo};
pub use session::{Session, SessionRepo};
