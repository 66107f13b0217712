use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// The current signed-in session, at most one row. Sign-out deletes the row
/// and nothing else; cached contacts stay on disk for the next sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub created_at: i64,
}

pub struct SessionRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SessionRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn set(&self, session: &Session) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session (id, user_id, email, access_token, created_at)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT (id) DO UPDATE SET
               user_id = excluded.user_id,
               email = excluded.email,
               access_token = excluded.access_token,
               created_at = excluded.created_at;",
            params![
                session.user_id,
                session.email,
                session.access_token,
                session.created_at
            ],
        )?;
        Ok(())
    }

    pub fn get(&self) -> Result<Option<Session>> {
        let session = self
            .conn
            .query_row(
                "SELECT user_id, email, access_token, created_at FROM session WHERE id = 1;",
                [],
                |row| {
                    Ok(Session {
                        user_id: row.get(0)?,
                        email: row.get(1)?,
                        access_token: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    }

    pub fn clear(&self) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM session WHERE id = 1;", [])?;
        Ok(deleted > 0)
    }
}
