pub mod category;
pub mod contact;
pub mod email;
pub mod ids;
pub mod phone;

pub use category::Category;
pub use contact::{Contact, MANUAL_ENTRY_SOURCE};
pub use email::normalize_email;
pub use ids::ContactId;
pub use phone::{normalize_phone, NormalizedPhone, MAX_PHONE_DIGITS};
