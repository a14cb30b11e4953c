//! SQLite-based persistence.
//!
//! Provides storage for:
//! - Planner tasks
//! - Completed Pomodoro sessions and their statistics
//! - Key-value store for widget engine snapshots between CLI invocations

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::planner::{Priority, Task};
use crate::pomodoro::SessionKind;

use super::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub total_work_min: u64,
    pub total_break_min: u64,
    pub completed_pomodoros: u64,
    pub today_sessions: u64,
    pub today_work_min: u64,
}

/// SQLite database for tasks, session history and engine snapshots.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/timedeck.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("timedeck.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                kind         TEXT NOT NULL,
                duration_min INTEGER NOT NULL,
                started_at   TEXT NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                time        TEXT,
                priority    TEXT NOT NULL DEFAULT 'medium',
                completed   INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);
            CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);",
        )?;
        Ok(())
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Record a completed session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        kind: SessionKind,
        duration_min: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64> {
        let kind_str = match kind {
            SessionKind::Work => "work",
            SessionKind::ShortBreak => "short_break",
            SessionKind::LongBreak => "long_break",
        };
        self.conn.execute(
            "INSERT INTO sessions (kind, duration_min, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                kind_str,
                duration_min,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn stats_today(&self) -> Result<Stats> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.collect_stats(Some(format!("{today}T00:00:00+00:00")))
    }

    pub fn stats_all(&self) -> Result<Stats> {
        let mut stats = self.collect_stats(None)?;
        let today = self.stats_today()?;
        stats.today_sessions = today.today_sessions;
        stats.today_work_min = today.today_work_min;
        Ok(stats)
    }

    fn collect_stats(&self, since: Option<String>) -> Result<Stats> {
        let mut stats = Stats::default();
        let mut stmt = self.conn.prepare(
            "SELECT kind, COUNT(*), COALESCE(SUM(duration_min), 0)
             FROM sessions
             WHERE completed_at >= ?1
             GROUP BY kind",
        )?;
        let floor = since.clone().unwrap_or_default();
        let rows = stmt.query_map(params![floor], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        for row in rows {
            let (kind, count, minutes) = row?;
            stats.total_sessions += count;
            match kind.as_str() {
                "work" => {
                    stats.completed_pomodoros += count;
                    stats.total_work_min += minutes;
                    if since.is_some() {
                        stats.today_sessions += count;
                        stats.today_work_min += minutes;
                    }
                }
                "short_break" | "long_break" => {
                    stats.total_break_min += minutes;
                }
                _ => {}
            }
        }
        Ok(stats)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Insert a planner task.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn task_add(&self, task: &Task) -> Result<()> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, description, time, priority, completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                task.id.to_string(),
                task.title,
                task.description,
                task.time.map(|t| t.format("%H:%M").to_string()),
                task.priority.as_str(),
                task.completed,
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All tasks in planner display order.
    pub fn task_list(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, time, priority, completed, created_at
             FROM tasks
             ORDER BY completed ASC, time IS NULL ASC, time ASC, created_at ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, bool>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, title, description, time, priority, completed, created_at) = row?;
            tasks.push(Task {
                id: Uuid::parse_str(&id)
                    .map_err(|e| DatabaseError::QueryFailed(format!("bad task id: {e}")))?,
                title,
                description,
                time: time
                    .map(|t| NaiveTime::parse_from_str(&t, "%H:%M"))
                    .transpose()
                    .map_err(|e| DatabaseError::QueryFailed(format!("bad task time: {e}")))?,
                priority: priority
                    .parse::<Priority>()
                    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
                completed,
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| DatabaseError::QueryFailed(format!("bad created_at: {e}")))?
                    .with_timezone(&Utc),
            });
        }
        Ok(tasks)
    }

    /// Flip a task's completed flag. Returns false when the id is unknown.
    pub fn task_toggle(&self, id: Uuid) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = NOT completed WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task. Returns false when the id is unknown.
    pub fn task_delete(&self, id: Uuid) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])?;
        Ok(changed > 0)
    }

    /// Remove every completed task; returns how many were deleted.
    pub fn task_clear_completed(&self) -> Result<usize> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE completed", [])?;
        Ok(changed)
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sessions_and_collect_stats() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(SessionKind::Work, 25, now, now).unwrap();
        db.record_session(SessionKind::ShortBreak, 5, now, now)
            .unwrap();
        db.record_session(SessionKind::Work, 25, now, now).unwrap();

        let stats = db.stats_all().unwrap();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.completed_pomodoros, 2);
        assert_eq!(stats.total_work_min, 50);
        assert_eq!(stats.total_break_min, 5);
        assert_eq!(stats.today_sessions, 2);
    }

    #[test]
    fn task_round_trip_in_display_order() {
        let db = Database::open_memory().unwrap();
        let early = Task::new(
            "standup",
            "",
            NaiveTime::from_hms_opt(9, 0, 0),
            Priority::High,
        )
        .unwrap();
        let untimed = Task::new("read paper", "", None, Priority::Low).unwrap();
        let late = Task::new(
            "review",
            "PR queue",
            NaiveTime::from_hms_opt(16, 30, 0),
            Priority::Medium,
        )
        .unwrap();
        db.task_add(&untimed).unwrap();
        db.task_add(&late).unwrap();
        db.task_add(&early).unwrap();

        let listed = db.task_list().unwrap();
        let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["standup", "review", "read paper"]);
        assert_eq!(listed[1].description, "PR queue");
        assert_eq!(listed[0].priority, Priority::High);
    }

    #[test]
    fn toggle_moves_task_to_the_bottom() {
        let db = Database::open_memory().unwrap();
        let a = Task::new("a", "", NaiveTime::from_hms_opt(8, 0, 0), Priority::Low).unwrap();
        let b = Task::new("b", "", NaiveTime::from_hms_opt(9, 0, 0), Priority::Low).unwrap();
        db.task_add(&a).unwrap();
        db.task_add(&b).unwrap();

        assert!(db.task_toggle(a.id).unwrap());
        let listed = db.task_list().unwrap();
        assert_eq!(listed[0].title, "b");
        assert_eq!(listed[1].title, "a");
        assert!(listed[1].completed);
    }

    #[test]
    fn toggle_and_delete_report_unknown_ids() {
        let db = Database::open_memory().unwrap();
        assert!(!db.task_toggle(Uuid::new_v4()).unwrap());
        assert!(!db.task_delete(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn clear_completed_removes_only_done_tasks() {
        let db = Database::open_memory().unwrap();
        let a = Task::new("a", "", None, Priority::Low).unwrap();
        let b = Task::new("b", "", None, Priority::Low).unwrap();
        db.task_add(&a).unwrap();
        db.task_add(&b).unwrap();
        db.task_toggle(a.id).unwrap();

        assert_eq!(db.task_clear_completed().unwrap(), 1);
        let remaining = db.task_list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "b");
    }

    #[test]
    fn kv_store_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("session_timer").unwrap().is_none());
        db.kv_set("session_timer", "{}").unwrap();
        assert_eq!(db.kv_get("session_timer").unwrap().unwrap(), "{}");
    }
}
