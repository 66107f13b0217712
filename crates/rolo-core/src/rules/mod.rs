pub mod validation;

pub use validation::{build_contacts, import_source_tag, CandidateRow};
