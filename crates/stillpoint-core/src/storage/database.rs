//! SQLite-based session log and key-value store.
//!
//! Provides persistent storage for:
//! - Completed practice sessions
//! - Session statistics
//! - Key-value store for host state (the serialized controller)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;
use crate::session::Mode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub mode: String,
    /// Goal size: seconds for timed sessions, beads otherwise.
    pub goal: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub timed_sessions: u64,
    pub bead_sessions: u64,
    pub total_practice_s: u64,
}

/// SQLite database for the session log.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/stillpoint/stillpoint.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|_| StorageError::QueryFailed("no data directory".into()))?
            .join("stillpoint.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path,
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                mode         TEXT NOT NULL,
                goal         INTEGER NOT NULL,
                started_at   TEXT NOT NULL,
                completed_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Record a completed session.
    pub fn record_session(
        &self,
        mode: Mode,
        goal: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mode = match mode {
            Mode::Timed => "timed",
            Mode::BeadCount => "beadcount",
        };
        self.conn.execute(
            "INSERT INTO sessions (mode, goal, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![mode, goal as i64, started_at.to_rfc3339(), completed_at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// All completed sessions, most recent first.
    pub fn sessions(&self) -> Result<Vec<SessionRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, goal, started_at, completed_at
             FROM sessions ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, mode, goal, started_at, completed_at) = row?;
            out.push(SessionRecord {
                id,
                mode,
                goal: goal as u64,
                started_at: parse_rfc3339(&started_at)?,
                completed_at: parse_rfc3339(&completed_at)?,
            });
        }
        Ok(out)
    }

    /// Aggregate statistics over the session log.
    pub fn stats(&self) -> Result<Stats, StorageError> {
        let sessions = self.sessions()?;
        let mut stats = Stats::default();
        for s in &sessions {
            stats.total_sessions += 1;
            match s.mode.as_str() {
                "timed" => stats.timed_sessions += 1,
                _ => stats.bead_sessions += 1,
            }
            let practiced = (s.completed_at - s.started_at).num_seconds().max(0) as u64;
            stats.total_practice_s += practiced;
        }
        Ok(stats)
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_rfc3339(text: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::QueryFailed(format!("bad timestamp '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("controller").unwrap().is_none());
        db.kv_set("controller", "{}").unwrap();
        assert_eq!(db.kv_get("controller").unwrap().unwrap(), "{}");
        db.kv_set("controller", "{\"a\":1}").unwrap();
        assert_eq!(db.kv_get("controller").unwrap().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn records_and_lists_sessions() {
        let db = Database::open_memory().unwrap();
        let start = Utc.with_ymd_and_hms(2026, 8, 20, 7, 0, 0).unwrap();
        let end = start + chrono::Duration::seconds(600);
        db.record_session(Mode::Timed, 600, start, end).unwrap();
        db.record_session(Mode::BeadCount, 108, end, end + chrono::Duration::seconds(300))
            .unwrap();

        let sessions = db.sessions().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].mode, "beadcount");
        assert_eq!(sessions[1].mode, "timed");
        assert_eq!(sessions[1].goal, 600);
    }

    #[test]
    fn stats_aggregate_the_log() {
        let db = Database::open_memory().unwrap();
        let start = Utc.with_ymd_and_hms(2026, 8, 20, 7, 0, 0).unwrap();
        db.record_session(Mode::Timed, 600, start, start + chrono::Duration::seconds(660))
            .unwrap();
        db.record_session(
            Mode::BeadCount,
            108,
            start,
            start + chrono::Duration::seconds(340),
        )
        .unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.timed_sessions, 1);
        assert_eq!(stats.bead_sessions, 1);
        assert_eq!(stats.total_practice_s, 1000);
    }
}
