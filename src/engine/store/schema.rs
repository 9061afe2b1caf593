// Database schema and migrations for the Vaani store.
// Called once at startup by MemoryStore::open() after WAL is enabled.
// Adding a new table or column: append an idempotent CREATE TABLE IF NOT
// EXISTS at the end of run_migrations() — never modify existing SQL to
// keep upgrade paths clean.
//
// The three namespaces are separate tables so that clearing one never
// touches the others.

use log::info;
use rusqlite::Connection;

use crate::atoms::error::AssistantResult;

pub(crate) fn run_migrations(conn: &Connection) -> AssistantResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS conversation_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            role TEXT NOT NULL,
            text TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS entities (
            kind TEXT NOT NULL,
            name TEXT NOT NULL,
            identifier TEXT NOT NULL,
            PRIMARY KEY (kind, name)
        );
        ",
    )?;
    Ok(())
}

/// Seed the entity dictionaries with the built-in defaults on first run
/// (an empty entities table). User additions are never overwritten.
pub(crate) fn seed_entities(conn: &Connection) -> AssistantResult<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM entities", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let contacts: &[(&str, &str)] = &[
        ("mom", "+918827613672"),
        ("mother", "+918827613672"),
        ("maa", "+918827613672"),
        ("dad", "+919584613672"),
        ("father", "+919584613672"),
        ("papa", "+919584613672"),
        ("rammohan", "+917879648737"),
        ("ram", "+917879648737"),
    ];
    let apps: &[(&str, &str)] = &[
        ("whatsapp", "com.whatsapp"),
        ("gmail", "com.google.android.gm"),
        ("chrome", "com.android.chrome"),
        ("youtube", "com.google.android.youtube"),
        ("instagram", "com.instagram.android"),
        ("camera", "com.android.camera2"),
        ("phone", "com.android.dialer"),
    ];

    for (name, number) in contacts {
        conn.execute(
            "INSERT INTO entities (kind, name, identifier) VALUES ('contact', ?1, ?2)",
            rusqlite::params![name, number],
        )?;
    }
    for (name, package) in apps {
        conn.execute(
            "INSERT INTO entities (kind, name, identifier) VALUES ('app', ?1, ?2)",
            rusqlite::params![name, package],
        )?;
    }

    info!("[memory] Seeded {} contacts and {} apps", contacts.len(), apps.len());
    Ok(())
}
