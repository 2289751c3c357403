use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

pub const DEFAULT_DB_PATH: &str = "data/facts.sqlite";

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Mirrors the external record store: facts keyed by slug identifier, plus
/// the category tables the scraping core never writes to.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS facts (
            id          INTEGER PRIMARY KEY,
            identifier  TEXT UNIQUE NOT NULL,
            fact        TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS categories (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            color       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS fact_categories (
            fact_id     INTEGER NOT NULL REFERENCES facts(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            UNIQUE(fact_id, category_id)
        );
        ",
    )?;
    Ok(())
}

// ── Stats ──

pub struct Stats {
    pub facts: usize,
    pub categories: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let facts: usize = conn.query_row("SELECT COUNT(*) FROM facts", [], |r| r.get(0))?;
    let categories: usize =
        conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    Ok(Stats { facts, categories })
}

#[cfg(test)]
pub fn connect_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    init_schema(&conn)?;
    Ok(conn)
}
