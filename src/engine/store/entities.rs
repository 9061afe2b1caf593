use rusqlite::params;

use super::MemoryStore;
use crate::atoms::error::AssistantResult;
use crate::atoms::types::EntityKind;

impl MemoryStore {
    // ── Entity dictionaries ────────────────────────────────────────────
    // name → canonical identifier, one namespace per kind. Names are
    // stored already-normalized (trimmed, lowercased) by the resolver.

    pub fn entity_get(&self, kind: EntityKind, name: &str) -> AssistantResult<Option<String>> {
        let conn = self.conn.lock();
        let result = conn.query_row(
            "SELECT identifier FROM entities WHERE kind = ?1 AND name = ?2",
            params![kind.as_str(), name],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(id) => Ok(Some(id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Last-write-wins upsert, committed before returning.
    pub fn entity_upsert(&self, kind: EntityKind, name: &str, identifier: &str) -> AssistantResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO entities (kind, name, identifier) VALUES (?1, ?2, ?3)",
            params![kind.as_str(), name, identifier],
        )?;
        Ok(())
    }

    /// All entries of one kind, ordered by name for deterministic
    /// iteration during fuzzy matching.
    pub fn entities(&self, kind: EntityKind) -> AssistantResult<Vec<(String, String)>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT name, identifier FROM entities WHERE kind = ?1 ORDER BY name",
        )?;
        let rows = stmt
            .query_map(params![kind.as_str()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    pub fn clear_entities(&self, kind: EntityKind) -> AssistantResult<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM entities WHERE kind = ?1", params![kind.as_str()])?;
        Ok(())
    }
}
