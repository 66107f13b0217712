use crate::domain::category::Category;
use crate::domain::ids::ContactId;
use crate::domain::phone::MAX_PHONE_DIGITS;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Provenance tag for contacts entered through the form path.
pub const MANUAL_ENTRY_SOURCE: &str = "Manual entry";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub category: Category,
    pub source: Option<String>,
    pub user_id: Option<String>,
    pub created_at: i64,
    pub synced_at: Option<i64>,
}

impl Contact {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(CoreError::EmptyEmail);
        }
        if self.phone.trim().is_empty() {
            return Err(CoreError::EmptyPhone);
        }

        let code = self.country_code.as_str();
        let valid_code = code
            .strip_prefix('+')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit()));
        if !valid_code {
            return Err(CoreError::InvalidCountryCode(self.country_code.clone()));
        }

        if self.phone.len() > MAX_PHONE_DIGITS
            || !self.phone.chars().all(|ch| ch.is_ascii_digit())
        {
            return Err(CoreError::InvalidPhone(self.phone.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Contact;
    use crate::domain::{Category, ContactId};
    use crate::error::CoreError;

    fn base_contact() -> Contact {
        Contact {
            id: ContactId::new(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            country_code: "+1".to_string(),
            phone: "4155551212".to_string(),
            category: Category::General,
            source: None,
            user_id: None,
            created_at: 1_700_000_000,
            synced_at: None,
        }
    }

    #[test]
    fn validate_accepts_complete_contact() {
        assert!(base_contact().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let mut contact = base_contact();
        contact.name = "  ".to_string();
        assert_eq!(contact.validate(), Err(CoreError::EmptyName));
    }

    #[test]
    fn validate_rejects_country_code_without_plus() {
        let mut contact = base_contact();
        contact.country_code = "44".to_string();
        assert!(matches!(
            contact.validate(),
            Err(CoreError::InvalidCountryCode(_))
        ));
    }

    #[test]
    fn validate_rejects_non_digit_phone() {
        let mut contact = base_contact();
        contact.phone = "415-555".to_string();
        assert!(matches!(contact.validate(), Err(CoreError::InvalidPhone(_))));
    }

    #[test]
    fn validate_rejects_overlong_phone() {
        let mut contact = base_contact();
        contact.phone = "41555512121".to_string();
        assert!(matches!(contact.validate(), Err(CoreError::InvalidPhone(_))));
    }
}
