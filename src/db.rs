//! Database module for Restaurant Finder
//!
//! Provides persistence for per-user session state.

mod schema;

use schema::SCHEMA;

use crate::state_machine::UserState;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("State encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        self.lock().execute_batch(SCHEMA)?;
        Ok(())
    }

    // A panic while holding the lock cannot leave a half-written row behind,
    // so a poisoned mutex is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Session Operations ====================

    /// Load the stored state for a user.
    ///
    /// Unknown users start from the default state. A row whose state no
    /// longer decodes is treated the same way rather than failing the turn.
    pub fn load_user(&self, user_id: &str) -> DbResult<UserState> {
        let raw: Option<String> = self
            .lock()
            .query_row(
                "SELECT state FROM user_sessions WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(UserState::default());
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Discarding undecodable session state"
                );
                Ok(UserState::default())
            }
        }
    }

    /// Store the full state for a user, replacing any previous record
    pub fn save_user(&self, user_id: &str, state: &UserState) -> DbResult<()> {
        let state_json = serde_json::to_string(state)?;
        let now = Utc::now().to_rfc3339();

        self.lock().execute(
            "INSERT INTO user_sessions (user_id, state, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(user_id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at",
            params![user_id, state_json, now],
        )?;
        Ok(())
    }

    /// Number of users with stored state
    pub fn session_count(&self) -> DbResult<u64> {
        let count: i64 =
            self.lock()
                .query_row("SELECT COUNT(*) FROM user_sessions", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::state::{Business, ResultSet};
    use crate::state_machine::LastAction;

    fn sample_state() -> UserState {
        let mut results = ResultSet::new(
            (1..=7)
                .map(|i| Business::named(format!("Place {i}")))
                .collect(),
        );
        results.seek(5);
        UserState {
            location: Some("98101".to_string()),
            last_action: LastAction::ReadList { start: 0 },
            results: Some(results),
        }
    }

    #[test]
    fn test_unknown_user_loads_default() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load_user("nobody").unwrap(), UserState::default());
        assert_eq!(db.session_count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let state = sample_state();

        db.save_user("user-1", &state).unwrap();
        assert_eq!(db.load_user("user-1").unwrap(), state);
        assert_eq!(db.session_count().unwrap(), 1);
    }

    #[test]
    fn test_save_replaces_previous_state() {
        let db = Database::open_in_memory().unwrap();
        db.save_user("user-1", &sample_state()).unwrap();

        let replaced = UserState {
            location: Some("Portland".to_string()),
            last_action: LastAction::SetLocation,
            results: None,
        };
        db.save_user("user-1", &replaced).unwrap();

        assert_eq!(db.load_user("user-1").unwrap(), replaced);
        assert_eq!(db.session_count().unwrap(), 1);

        let (created_at, updated_at): (String, String) = db
            .lock()
            .query_row(
                "SELECT created_at, updated_at FROM user_sessions WHERE user_id = 'user-1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at).unwrap();
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at).unwrap();
        assert!(updated_at >= created_at);
    }

    #[test]
    fn test_undecodable_state_loads_default() {
        let db = Database::open_in_memory().unwrap();
        db.lock()
            .execute(
                "INSERT INTO user_sessions (user_id, state, created_at, updated_at)
                 VALUES ('user-1', 'not json', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        assert_eq!(db.load_user("user-1").unwrap(), UserState::default());
    }

    #[test]
    fn test_cursor_past_end_loads_clamped() {
        use crate::state_machine::{transition, Event};

        let db = Database::open_in_memory().unwrap();
        let state = serde_json::json!({
            "location": "Seattle",
            "last_action": { "type": "read_list", "start": 90 },
            "results": { "businesses": [{ "name": "A" }, { "name": "B" }], "read": 100 }
        })
        .to_string();
        db.lock()
            .execute(
                "INSERT INTO user_sessions (user_id, state, created_at, updated_at)
                 VALUES ('user-1', ?1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
                params![state],
            )
            .unwrap();

        let loaded = db.load_user("user-1").unwrap();
        assert_eq!(loaded.results.as_ref().map(ResultSet::read), Some(2));

        let back = transition(&loaded, Event::Back).unwrap();
        assert!(back.reply.unwrap().text().starts_with("Reading 2 restaurants."));
        assert_eq!(back.new_state.last_action, LastAction::ReadList { start: 0 });
    }

    #[test]
    fn test_users_are_isolated() {
        let db = Database::open_in_memory().unwrap();
        db.save_user("a", &sample_state()).unwrap();

        assert_eq!(db.load_user("b").unwrap(), UserState::default());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.db");

        {
            let db = Database::open(&path).unwrap();
            db.save_user("user-1", &sample_state()).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.load_user("user-1").unwrap(), sample_state());
    }
}
