use crate::domain::{normalize_email, Category, Contact, ContactId};

/// A row as it leaves the extractor or the manual entry form: normalized
/// phone and country code, but not yet validated or assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateRow {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
}

impl CandidateRow {
    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

pub fn import_source_tag(file_name: &str) -> String {
    format!("Imported from {file_name}")
}

/// Turns candidate rows into cache-ready contacts. Rows missing name, email,
/// or phone after trimming are dropped; surviving rows get a fresh id, the
/// provenance tag, and the owner of the current session. Intentionally
/// permissive beyond presence: no email-format or phone-minimum checks.
pub fn build_contacts(
    rows: Vec<CandidateRow>,
    category: Category,
    source: &str,
    user_id: Option<&str>,
    now_utc: i64,
) -> Vec<Contact> {
    rows.into_iter()
        .filter(CandidateRow::is_complete)
        .map(|row| Contact {
            id: ContactId::new(),
            name: row.name.trim().to_string(),
            email: normalize_email(&row.email).unwrap_or_default(),
            country_code: row.country_code,
            phone: row.phone,
            category,
            source: Some(source.to_string()),
            user_id: user_id.map(str::to_string),
            created_at: now_utc,
            synced_at: None,
        })
        .collect()
}
