use rusqlite::{Connection, Result as SqlResult};
use std::path::{Path, PathBuf};
use chrono::Utc;

/// How many recent queries the application surfaces as chips
pub const RECENT_LIMIT: usize = 8;

/// The SearchHistory manages the SQLite store of submitted queries.
/// Each distinct query is kept once, with a use counter and the time it
/// was last searched, so the most recent searches can be offered back
/// as one-click chips.
pub struct SearchHistory {
    conn: Connection,
}

impl SearchHistory {
    /// Open the history database at its default location.
    ///
    /// The database file lives in the user's data directory:
    /// - Linux: ~/.local/share/pixseek/history.db
    /// - macOS: ~/Library/Application Support/pixseek/history.db
    /// - Windows: %APPDATA%\pixseek\history.db
    pub fn open_default() -> SqlResult<Self> {
        let db_path = Self::default_db_path();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .expect("Failed to create application data directory");
        }

        Self::open(&db_path)
    }

    /// Open (or create) the history database at a specific path
    pub fn open(path: &Path) -> SqlResult<Self> {
        let conn = Connection::open(path)?;
        let history = SearchHistory { conn };
        history.init_schema()?;
        Ok(history)
    }

    /// Open a throwaway in-memory history. Used as a fallback when the
    /// on-disk database cannot be opened, and by tests.
    pub fn in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        let history = SearchHistory { conn };
        history.init_schema()?;
        Ok(history)
    }

    /// Where the history database is stored by default
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("pixseek");
        path.push("history.db");
        path
    }

    /// Create the schema if it doesn't exist yet
    fn init_schema(&self) -> SqlResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS searches (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                query           TEXT NOT NULL UNIQUE,
                uses            INTEGER NOT NULL DEFAULT 1,
                last_used_at    INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_searches_last_used_at
             ON searches(last_used_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Record a submitted query, bumping its recency and use count if it
    /// was searched before
    pub fn record(&self, query: &str) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO searches (query, uses, last_used_at) VALUES (?1, 1, ?2)
             ON CONFLICT(query) DO UPDATE SET
                uses = uses + 1,
                last_used_at = excluded.last_used_at",
            rusqlite::params![query, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// The most recently used queries, newest first
    pub fn recent(&self, limit: usize) -> SqlResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT query FROM searches ORDER BY last_used_at DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit], |row| row.get(0))?;

        let mut queries = Vec::new();
        for query in rows {
            queries.push(query?);
        }

        Ok(queries)
    }

    /// How many distinct queries have been recorded
    pub fn query_count(&self) -> SqlResult<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM searches", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl std::fmt::Debug for SearchHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistory").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_recall() {
        let history = SearchHistory::in_memory().unwrap();

        history.record("cats").unwrap();
        history.record("dogs").unwrap();

        assert_eq!(history.query_count().unwrap(), 2);
        let recent = history.recent(RECENT_LIMIT).unwrap();
        assert!(recent.contains(&"cats".to_string()));
        assert!(recent.contains(&"dogs".to_string()));
    }

    #[test]
    fn test_repeat_query_is_deduplicated() {
        let history = SearchHistory::in_memory().unwrap();

        history.record("cats").unwrap();
        history.record("cats").unwrap();
        history.record("cats").unwrap();

        assert_eq!(history.query_count().unwrap(), 1);
        assert_eq!(history.recent(RECENT_LIMIT).unwrap(), vec!["cats"]);
    }

    #[test]
    fn test_recent_respects_limit() {
        let history = SearchHistory::in_memory().unwrap();

        for query in ["a", "b", "c", "d"] {
            history.record(query).unwrap();
        }

        assert_eq!(history.recent(2).unwrap().len(), 2);
    }

    #[test]
    fn test_opens_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");

        {
            let history = SearchHistory::open(&path).unwrap();
            history.record("persisted").unwrap();
        }

        // Reopening sees the previously recorded query
        let history = SearchHistory::open(&path).unwrap();
        assert_eq!(history.recent(RECENT_LIMIT).unwrap(), vec!["persisted"]);
    }
}
