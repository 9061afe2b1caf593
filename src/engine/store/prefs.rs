use rusqlite::params;

use super::MemoryStore;
use crate::atoms::error::AssistantResult;

impl MemoryStore {
    // ── Preference table ───────────────────────────────────────────────
    // Unique keys, last-write-wins, persisted independently of the log.

    pub fn get_preference(&self, key: &str) -> AssistantResult<Option<String>> {
        let conn = self.conn.lock();
        let result = conn.query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_preference(&self, key: &str, value: &str) -> AssistantResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Independent of `clear()` on the conversation log.
    pub fn clear_preferences(&self) -> AssistantResult<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM preferences", [])?;
        Ok(())
    }
}
