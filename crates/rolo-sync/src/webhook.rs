#[cfg(feature = "remote")]
mod imp {
    use crate::error::Result;
    use reqwest::blocking::Client;
    use rolo_core::domain::Contact;
    use serde::Serialize;
    use std::time::Duration;
    use url::Url;

    #[derive(Debug, Serialize)]
    struct WebhookPayload<'a> {
        name: &'a str,
        email: &'a str,
        phone: &'a str,
        category: &'a str,
    }

    /// Posts a contact to an external notification endpoint. Callers treat a
    /// failure as a soft warning; nothing in the primary flow depends on it.
    pub fn post_contact(endpoint: &str, contact: &Contact) -> Result<()> {
        let url = Url::parse(endpoint)?;
        let client = Client::builder()
            .user_agent("rolo")
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        client
            .post(url)
            .json(&WebhookPayload {
                name: &contact.name,
                email: &contact.email,
                phone: &contact.phone,
                category: contact.category.as_str(),
            })
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(feature = "remote")]
pub use imp::post_contact;
