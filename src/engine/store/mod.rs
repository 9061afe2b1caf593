// Vaani Engine — Memory Store
// Persists the three durable namespaces in SQLite via rusqlite:
// the bounded conversation log, the preference table, and the entity
// dictionaries. Every mutation is write-through: the statement commits
// before the call returns, so a crash loses at most the operation in
// flight.
//
// Module layout:
//   conversation — bounded conversation log (append/recent/search/clear)
//   prefs        — key/value preference table
//   entities     — contact/app dictionaries + seed data
//   schema       — idempotent migrations

use log::info;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

use crate::atoms::error::AssistantResult;

mod conversation;
mod entities;
mod prefs;
mod schema;

/// Thread-safe database wrapper. Single-writer discipline comes from the
/// mutex: concurrent flushes can never interleave in the snapshot.
pub struct MemoryStore {
    /// The SQLite connection, protected by a Mutex.
    conn: Mutex<Connection>,
    /// FIFO bound on the conversation log.
    capacity: usize,
}

impl MemoryStore {
    /// Open (or create) the database at `path` and initialize tables.
    /// First run seeds the entity dictionaries with the built-in defaults.
    pub fn open(path: &Path, capacity: usize) -> AssistantResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("[memory] Opening store at {:?} (capacity {})", path, capacity);

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();
        schema::run_migrations(&conn)?;
        schema::seed_entities(&conn)?;

        Ok(MemoryStore { conn: Mutex::new(conn), capacity })
    }

    /// In-memory store for tests — same schema and seed data, no file.
    pub fn open_in_memory(capacity: usize) -> AssistantResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::run_migrations(&conn)?;
        schema::seed_entities(&conn)?;
        Ok(MemoryStore { conn: Mutex::new(conn), capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
