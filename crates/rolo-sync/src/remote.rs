use crate::error::Result;
use rolo_core::domain::{Category, Contact, ContactId};
use serde::Serialize;

/// Maximum rows per insert request.
pub const BATCH_SIZE: usize = 100;

/// Wire shape of one contact row as the remote tables expect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteContactRow {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub user_id: Option<String>,
}

impl RemoteContactRow {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            country_code: contact.country_code.clone(),
            phone: contact.phone.clone(),
            user_id: contact.user_id.clone(),
        }
    }
}

/// Seam over the remote table API: anything that can insert a batch of rows
/// into a named table.
pub trait ContactSink {
    fn sink_name(&self) -> &'static str;
    fn insert_batch(&self, table: &str, rows: &[RemoteContactRow]) -> Result<()>;
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub table: String,
    pub inserted: usize,
    pub batches: usize,
    pub failed_batches: usize,
    pub warnings: Vec<String>,
    /// Ids of contacts in batches the sink accepted; callers use these to
    /// mark the local cache rows as synced.
    #[serde(skip)]
    pub synced_ids: Vec<ContactId>,
}

/// Submits contacts to the category's table in sequential batches of at most
/// [`BATCH_SIZE`]. A failed batch is recorded as a warning and the remaining
/// batches are still attempted; accepted batches are never rolled back and
/// no retry is made.
pub fn push_contacts(
    sink: &dyn ContactSink,
    category: Category,
    contacts: &[Contact],
) -> SyncReport {
    let table = category.table_name();
    let mut report = SyncReport {
        table: table.to_string(),
        inserted: 0,
        batches: 0,
        failed_batches: 0,
        warnings: Vec::new(),
        synced_ids: Vec::new(),
    };

    for chunk in contacts.chunks(BATCH_SIZE) {
        let rows: Vec<RemoteContactRow> = chunk.iter().map(RemoteContactRow::from_contact).collect();
        report.batches += 1;
        match sink.insert_batch(table, &rows) {
            Ok(()) => {
                report.inserted += chunk.len();
                report.synced_ids.extend(chunk.iter().map(|contact| contact.id));
            }
            Err(err) => {
                report.failed_batches += 1;
                report
                    .warnings
                    .push(format!("batch of {} rows failed: {err}", chunk.len()));
            }
        }
    }

    report
}

#[cfg(feature = "remote")]
mod imp {
    use super::{ContactSink, RemoteContactRow};
    use crate::error::{Result, SyncError};
    use reqwest::blocking::Client;
    use std::time::Duration;
    use url::Url;

    /// Table-insert client for a Supabase-style REST endpoint.
    #[derive(Debug, Clone)]
    pub struct SupabaseSink {
        base_url: Url,
        anon_key: String,
        access_token: String,
        client: Client,
    }

    impl SupabaseSink {
        pub fn new(base_url: &str, anon_key: &str, access_token: &str) -> Result<Self> {
            let base_url = Url::parse(base_url)?;
            if base_url.scheme() != "https" {
                return Err(SyncError::Parse("remote url must use https".to_string()));
            }
            let client = Client::builder()
                .user_agent("rolo")
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()?;
            Ok(Self {
                base_url,
                anon_key: anon_key.to_string(),
                access_token: access_token.to_string(),
                client,
            })
        }
    }

    impl ContactSink for SupabaseSink {
        fn sink_name(&self) -> &'static str {
            "supabase"
        }

        fn insert_batch(&self, table: &str, rows: &[RemoteContactRow]) -> Result<()> {
            let url = self.base_url.join(&format!("rest/v1/{table}"))?;
            let response = self
                .client
                .post(url)
                .header("apikey", &self.anon_key)
                .bearer_auth(&self.access_token)
                .header("Prefer", "return=minimal")
                .json(rows)
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().unwrap_or_default();
                return Err(SyncError::Remote {
                    status: status.as_u16(),
                    message,
                });
            }
            Ok(())
        }
    }
}

#[cfg(feature = "remote")]
pub use imp::SupabaseSink;

#[cfg(test)]
mod tests {
    use super::{push_contacts, ContactSink, RemoteContactRow, BATCH_SIZE};
    use crate::error::{Result, SyncError};
    use rolo_core::domain::{Category, Contact, ContactId};
    use std::cell::RefCell;

    struct StubSink {
        batch_sizes: RefCell<Vec<usize>>,
        fail_batch: Option<usize>,
    }

    impl StubSink {
        fn new(fail_batch: Option<usize>) -> Self {
            Self {
                batch_sizes: RefCell::new(Vec::new()),
                fail_batch,
            }
        }
    }

    impl ContactSink for StubSink {
        fn sink_name(&self) -> &'static str {
            "stub"
        }

        fn insert_batch(&self, _table: &str, rows: &[RemoteContactRow]) -> Result<()> {
            let index = self.batch_sizes.borrow().len();
            self.batch_sizes.borrow_mut().push(rows.len());
            if self.fail_batch == Some(index) {
                return Err(SyncError::Parse("stub batch rejected".to_string()));
            }
            Ok(())
        }
    }

    fn contacts(count: usize) -> Vec<Contact> {
        (0..count)
            .map(|i| Contact {
                id: ContactId::new(),
                name: format!("Person {i}"),
                email: format!("p{i}@x.com"),
                country_code: "+1".to_string(),
                phone: "4155551212".to_string(),
                category: Category::General,
                source: None,
                user_id: Some("user-1".to_string()),
                created_at: 0,
                synced_at: None,
            })
            .collect()
    }

    #[test]
    fn push_splits_into_batches_of_one_hundred() {
        let sink = StubSink::new(None);
        let report = push_contacts(&sink, Category::General, &contacts(250));
        assert_eq!(*sink.batch_sizes.borrow(), vec![100, 100, 50]);
        assert_eq!(report.batches, 3);
        assert_eq!(report.inserted, 250);
        assert_eq!(report.failed_batches, 0);
        assert_eq!(report.synced_ids.len(), 250);
    }

    #[test]
    fn push_targets_the_category_table() {
        let sink = StubSink::new(None);
        let report = push_contacts(&sink, Category::Doctor, &contacts(1));
        assert_eq!(report.table, "doctor_contacts");
    }

    #[test]
    fn push_continues_past_a_failed_batch() {
        let sink = StubSink::new(Some(1));
        let all = contacts(BATCH_SIZE * 2 + 50);
        let report = push_contacts(&sink, Category::General, &all);
        assert_eq!(report.batches, 3);
        assert_eq!(report.failed_batches, 1);
        assert_eq!(report.inserted, 150);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.synced_ids.len(), 150);
    }

    #[test]
    fn push_with_no_contacts_issues_no_requests() {
        let sink = StubSink::new(None);
        let report = push_contacts(&sink, Category::General, &[]);
        assert!(sink.batch_sizes.borrow().is_empty());
        assert_eq!(report.batches, 0);
    }
}
