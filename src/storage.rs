use anyhow::Result;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::fact::Fact;

/// Persistence backend for extracted facts, keyed solely by identifier.
pub trait Storage {
    fn save(&self, facts: &[Fact]) -> Result<()>;
    fn delete(&self, facts: &[Fact]) -> Result<()>;
}

/// SQLite-backed storage. `override_existing` decides whether a fact whose
/// identifier is already persisted gets overwritten or skipped.
pub struct DbStorage {
    conn: Connection,
    override_existing: bool,
}

impl DbStorage {
    pub fn new(conn: Connection, override_existing: bool) -> Self {
        DbStorage {
            conn,
            override_existing,
        }
    }
}

impl Storage for DbStorage {
    /// Upsert-or-skip, per fact in input order. The single INSERT OR IGNORE
    /// keeps the identifier-keyed get-or-create atomic under concurrent runs.
    fn save(&self, facts: &[Fact]) -> Result<()> {
        let mut insert = self.conn.prepare(
            "INSERT OR IGNORE INTO facts (identifier, fact, description) VALUES (?1, ?2, ?3)",
        )?;
        let mut update = self.conn.prepare(
            "UPDATE facts SET fact = ?2, description = ?3, updated_at = datetime('now')
             WHERE identifier = ?1",
        )?;

        for (index, fact) in facts.iter().enumerate() {
            let created = insert.execute(rusqlite::params![
                fact.identifier,
                fact.fact,
                fact.description
            ])?;
            if created == 1 {
                info!("Saved fact #{index} ({})", fact.identifier);
            } else if self.override_existing {
                update.execute(rusqlite::params![
                    fact.identifier,
                    fact.fact,
                    fact.description
                ])?;
                info!("Updated fact #{index} ({})", fact.identifier);
            } else {
                info!("Fact #{index} already exists, skipping ({})", fact.identifier);
            }
        }
        Ok(())
    }

    /// Best-effort per item: a missing identifier logs a warning and the run
    /// continues.
    fn delete(&self, facts: &[Fact]) -> Result<()> {
        let mut stmt = self.conn.prepare("DELETE FROM facts WHERE identifier = ?1")?;
        for (index, fact) in facts.iter().enumerate() {
            let removed = stmt.execute(rusqlite::params![fact.identifier])?;
            if removed == 0 {
                warn!("Fact {} (#{index}) not found", fact.identifier);
            } else {
                info!("Deleted fact {} (#{index})", fact.identifier);
            }
        }
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn storage(override_existing: bool) -> DbStorage {
        DbStorage::new(db::connect_in_memory().unwrap(), override_existing)
    }

    fn fetch(storage: &DbStorage, identifier: &str) -> Option<(String, String)> {
        storage
            .conn
            .query_row(
                "SELECT fact, description FROM facts WHERE identifier = ?1",
                [identifier],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .ok()
    }

    fn count(storage: &DbStorage) -> usize {
        storage
            .conn
            .query_row("SELECT COUNT(*) FROM facts", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn save_twice_is_idempotent() {
        let s = storage(false);
        let fact = Fact::new("Bees can fly upside down", "They really can.");
        s.save(std::slice::from_ref(&fact)).unwrap();
        s.save(std::slice::from_ref(&fact)).unwrap();
        assert_eq!(count(&s), 1);
        let (text, desc) = fetch(&s, &fact.identifier).unwrap();
        assert_eq!(text, fact.fact);
        assert_eq!(desc, fact.description);
    }

    #[test]
    fn save_without_override_keeps_original() {
        let s = storage(false);
        s.save(&[Fact::new("Bananas are berries", "Original.")]).unwrap();
        s.save(&[Fact::new("Bananas are berries", "Changed.")]).unwrap();
        let (_, desc) = fetch(&s, "bananas-are-berries").unwrap();
        assert_eq!(desc, "Original.");
    }

    #[test]
    fn save_with_override_replaces_text() {
        let s = storage(true);
        s.save(&[Fact::new("Bananas are berries", "Original.")]).unwrap();
        s.save(&[Fact::new("Bananas are berries", "Changed.")]).unwrap();
        assert_eq!(count(&s), 1);
        let (_, desc) = fetch(&s, "bananas-are-berries").unwrap();
        assert_eq!(desc, "Changed.");
    }

    #[test]
    fn delete_removes_by_identifier() {
        let s = storage(false);
        let fact = Fact::new("Sharks predate trees", "");
        s.save(std::slice::from_ref(&fact)).unwrap();
        s.delete(&[fact]).unwrap();
        assert_eq!(count(&s), 0);
    }

    #[test]
    fn delete_missing_is_not_fatal() {
        let s = storage(false);
        s.save(&[Fact::new("Sharks predate trees", "")]).unwrap();
        s.delete(&[Fact::new("Never stored", "")]).unwrap();
        // Unrelated record untouched
        assert_eq!(count(&s), 1);
        assert!(fetch(&s, "sharks-predate-trees").is_some());
    }

    #[test]
    fn save_list_order_preserved_on_first_write() {
        let s = storage(false);
        let first = Fact::new("Same title", "First wins.");
        let second = Fact::new("Same title", "Second is skipped.");
        assert_eq!(first.identifier, second.identifier);
        s.save(&[first, second]).unwrap();
        let (_, desc) = fetch(&s, "same-title").unwrap();
        assert_eq!(desc, "First wins.");
    }
}
