use crate::error::{Result, StoreError};
use rolo_core::domain::{Category, Contact, ContactId};
use rusqlite::{params, Connection, Row};
use std::str::FromStr;

const CONTACT_COLUMNS: &str =
    "id, name, email, country_code, phone, category, source, user_id, created_at, synced_at";

/// Per-user partition of the local contact cache. `owner = None` is the
/// partition of unauthenticated sessions; ownerless contacts are never
/// visible to a signed-in user.
pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Appends contacts to their partitions in one transaction. Every
    /// contact is validated before the first insert, so a bad row leaves the
    /// cache untouched.
    pub fn append(&self, contacts: &[Contact]) -> Result<usize> {
        for contact in contacts {
            contact.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO contacts (id, name, email, country_code, phone, category, source, user_id, created_at, synced_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            )?;
            for contact in contacts {
                stmt.execute(params![
                    contact.id.to_string(),
                    contact.name,
                    contact.email,
                    contact.country_code,
                    contact.phone,
                    contact.category.as_str(),
                    contact.source,
                    contact.user_id,
                    contact.created_at,
                    contact.synced_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(contacts.len())
    }

    pub fn list(&self, owner: Option<&str>, category: Option<Category>) -> Result<Vec<Contact>> {
        self.list_where(owner, category, false)
    }

    pub fn list_unsynced(
        &self,
        owner: Option<&str>,
        category: Option<Category>,
    ) -> Result<Vec<Contact>> {
        self.list_where(owner, category, true)
    }

    fn list_where(
        &self,
        owner: Option<&str>,
        category: Option<Category>,
        unsynced_only: bool,
    ) -> Result<Vec<Contact>> {
        let mut sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id IS ?1"
        );
        if unsynced_only {
            sql.push_str(" AND synced_at IS NULL");
        }
        if category.is_some() {
            sql.push_str(" AND category = ?2");
        }
        sql.push_str(" ORDER BY created_at ASC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut contacts = Vec::new();
        match category {
            Some(category) => {
                let mut rows = stmt.query(params![owner, category.as_str()])?;
                while let Some(row) = rows.next()? {
                    contacts.push(contact_from_row(row)?);
                }
            }
            None => {
                let mut rows = stmt.query(params![owner])?;
                while let Some(row) = rows.next()? {
                    contacts.push(contact_from_row(row)?);
                }
            }
        }
        Ok(contacts)
    }

    /// Overwrites a partition with the given list. Last writer wins.
    pub fn save(&self, owner: Option<&str>, contacts: &[Contact]) -> Result<usize> {
        for contact in contacts {
            contact.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM contacts WHERE user_id IS ?1;", params![owner])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO contacts (id, name, email, country_code, phone, category, source, user_id, created_at, synced_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            )?;
            for contact in contacts {
                stmt.execute(params![
                    contact.id.to_string(),
                    contact.name,
                    contact.email,
                    contact.country_code,
                    contact.phone,
                    contact.category.as_str(),
                    contact.source,
                    contact.user_id,
                    contact.created_at,
                    contact.synced_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(contacts.len())
    }

    pub fn mark_synced(&self, ids: &[ContactId], now_utc: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut updated = 0;
        {
            let mut stmt =
                tx.prepare("UPDATE contacts SET synced_at = ?1 WHERE id = ?2;")?;
            for id in ids {
                updated += stmt.execute(params![now_utc, id.to_string()])?;
            }
        }
        tx.commit()?;
        Ok(updated)
    }

    pub fn clear(&self, owner: Option<&str>) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM contacts WHERE user_id IS ?1;", params![owner])?;
        Ok(deleted)
    }

    pub fn count(&self, owner: Option<&str>) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM contacts WHERE user_id IS ?1;",
            params![owner],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn contact_from_row(row: &Row<'_>) -> Result<Contact> {
    let id_raw: String = row.get(0)?;
    let id = ContactId::from_str(&id_raw).map_err(|_| StoreError::InvalidId(id_raw))?;
    let category_raw: String = row.get(5)?;
    let category = Category::from_str(&category_raw)?;
    Ok(Contact {
        id,
        name: row.get(1)?,
        email: row.get(2)?,
        country_code: row.get(3)?,
        phone: row.get(4)?,
        category,
        source: row.get(6)?,
        user_id: row.get(7)?,
        created_at: row.get(8)?,
        synced_at: row.get(9)?,
    })
}
