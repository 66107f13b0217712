use crate::error::Result;
use rusqlite::{params, Connection};

/// Filename recorded once per successful import batch, display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub created_at: i64,
}

pub struct UploadedFilesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UploadedFilesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, owner: Option<&str>, file_name: &str, now_utc: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO uploaded_files (file_name, user_id, created_at) VALUES (?1, ?2, ?3);",
            params![file_name, owner, now_utc],
        )?;
        Ok(())
    }

    pub fn list(&self, owner: Option<&str>) -> Result<Vec<UploadedFile>> {
        let mut stmt = self.conn.prepare(
            "SELECT file_name, created_at FROM uploaded_files
             WHERE user_id IS ?1 ORDER BY created_at ASC, id ASC;",
        )?;
        let mut rows = stmt.query(params![owner])?;
        let mut files = Vec::new();
        while let Some(row) = rows.next()? {
            files.push(UploadedFile {
                file_name: row.get(0)?,
                created_at: row.get(1)?,
            });
        }
        Ok(files)
    }

    pub fn clear(&self, owner: Option<&str>) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM uploaded_files WHERE user_id IS ?1;",
            params![owner],
        )?;
        Ok(deleted)
    }
}
