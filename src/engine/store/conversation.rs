use rusqlite::params;

use super::MemoryStore;
use crate::atoms::error::AssistantResult;
use crate::atoms::types::{ConversationEntry, Role};

impl ConversationEntry {
    /// Map a row with columns (role, text, timestamp) → ConversationEntry.
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let role: String = row.get(0)?;
        Ok(ConversationEntry {
            role: Role::parse(&role),
            text: row.get(1)?,
            timestamp: row.get(2)?,
        })
    }
}

impl MemoryStore {
    // ── Conversation log ───────────────────────────────────────────────

    /// Append one entry, evicting the oldest rows beyond capacity.
    /// Insert and trim commit as one transaction, so the persisted
    /// snapshot never holds more than `capacity` rows, even across a
    /// crash between the two statements.
    pub fn append(&self, entry: &ConversationEntry) -> AssistantResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO conversation_log (role, text, timestamp) VALUES (?1, ?2, ?3)",
            params![entry.role.as_str(), entry.text, entry.timestamp],
        )?;
        tx.execute(
            "DELETE FROM conversation_log WHERE id NOT IN
             (SELECT id FROM conversation_log ORDER BY id DESC LIMIT ?1)",
            params![self.capacity as i64],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// The most recent `n` entries in original insertion order.
    pub fn recent(&self, n: usize) -> AssistantResult<Vec<ConversationEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT role, text, timestamp FROM conversation_log
             ORDER BY id DESC LIMIT ?1",
        )?;
        let mut entries: Vec<ConversationEntry> = stmt
            .query_map(params![n as i64], ConversationEntry::from_row)?
            .filter_map(|r| r.ok())
            .collect();
        entries.reverse();
        Ok(entries)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> AssistantResult<Vec<ConversationEntry>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT role, text, timestamp FROM conversation_log ORDER BY id")?;
        let entries = stmt
            .query_map([], ConversationEntry::from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(entries)
    }

    /// Case-insensitive substring search over entry text, oldest first.
    pub fn search(&self, needle: &str) -> AssistantResult<Vec<ConversationEntry>> {
        let conn = self.conn.lock();
        let pattern = format!("%{}%", needle.to_lowercase());
        let mut stmt = conn.prepare(
            "SELECT role, text, timestamp FROM conversation_log
             WHERE LOWER(text) LIKE ?1 ORDER BY id",
        )?;
        let entries = stmt
            .query_map(params![pattern], ConversationEntry::from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(entries)
    }

    pub fn len(&self) -> AssistantResult<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM conversation_log", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> AssistantResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove the log and its persisted rows. Preferences and entity
    /// dictionaries are separate namespaces with their own clears.
    pub fn clear(&self) -> AssistantResult<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM conversation_log", [])?;
        Ok(())
    }
}
