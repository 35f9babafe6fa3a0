//! Database repository layer
//!
//! Query and insert operations for users and journal entries. The analytics
//! and filter engines only use the read side; writes exist for the
//! application layer that owns entry lifecycle.

use crate::error::{Error, Result};
use crate::types::{word_count, JournalEntry, NewEntry, User};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// Database handle with a single serialized connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for better concurrency
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // ============================================
    // User operations
    // ============================================

    /// Create a user account and return the stored record.
    pub fn create_user(&self, name: &str) -> Result<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![user.id, user.name, user.created_at.to_rfc3339()],
        )?;

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, name, created_at FROM users WHERE id = ?",
            [id],
            Self::row_to_user,
        )
        .optional()
        .map_err(Error::from)
    }

    /// Delete a user and all of their entries.
    pub fn delete_user(&self, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM entries WHERE owner_id = ?", [id])?;
        let changed = conn.execute("DELETE FROM users WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(Error::UserNotFound(id.to_string()));
        }
        Ok(())
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        let created_at_str: String = row.get("created_at")?;
        Ok(User {
            id: row.get("id")?,
            name: row.get("name")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    // ============================================
    // Entry operations
    // ============================================

    /// Insert a new entry, assigning its id and recomputing the word count.
    pub fn insert_entry(&self, entry: &NewEntry) -> Result<JournalEntry> {
        let stored = JournalEntry {
            id: Uuid::new_v4().to_string(),
            owner_id: entry.owner_id.clone(),
            date: entry.date,
            title: entry.title.clone(),
            content: entry.content.clone(),
            primary_mood: entry.primary_mood.clone(),
            secondary_mood_a: entry.secondary_mood_a.clone(),
            secondary_mood_b: entry.secondary_mood_b.clone(),
            category: entry.category.clone(),
            tags_json: serde_json::to_string(&entry.tags)?,
            word_count: word_count(&entry.content),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO entries (
                id, owner_id, date, title, content,
                primary_mood, secondary_mood_a, secondary_mood_b,
                category, tags, word_count
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                stored.id,
                stored.owner_id,
                stored.date.to_string(),
                stored.title,
                stored.content,
                stored.primary_mood,
                stored.secondary_mood_a,
                stored.secondary_mood_b,
                stored.category,
                stored.tags_json,
                stored.word_count,
            ],
        )?;

        tracing::debug!(entry_id = stored.id, owner_id = stored.owner_id, "Inserted entry");
        Ok(stored)
    }

    /// Update an existing entry in place.
    ///
    /// The word count is recomputed from the new content; the id and owner
    /// are immutable once assigned.
    pub fn update_entry(&self, id: &str, entry: &NewEntry) -> Result<JournalEntry> {
        let tags_json = serde_json::to_string(&entry.tags)?;
        let words = word_count(&entry.content);

        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            r#"
            UPDATE entries SET
                date = ?2,
                title = ?3,
                content = ?4,
                primary_mood = ?5,
                secondary_mood_a = ?6,
                secondary_mood_b = ?7,
                category = ?8,
                tags = ?9,
                word_count = ?10
            WHERE id = ?1
            "#,
            params![
                id,
                entry.date.to_string(),
                entry.title,
                entry.content,
                entry.primary_mood,
                entry.secondary_mood_a,
                entry.secondary_mood_b,
                entry.category,
                tags_json,
                words,
            ],
        )?;
        if changed == 0 {
            return Err(Error::EntryNotFound(id.to_string()));
        }
        drop(conn);

        self.get_entry(id)?
            .ok_or_else(|| Error::EntryNotFound(id.to_string()))
    }

    /// Delete an entry by ID
    pub fn delete_entry(&self, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute("DELETE FROM entries WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(Error::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Get an entry by ID
    pub fn get_entry(&self, id: &str) -> Result<Option<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT * FROM entries WHERE id = ?", [id], Self::row_to_entry)
            .optional()
            .map_err(Error::from)
    }

    /// All entries for one owner, ordered by date descending.
    ///
    /// Ties on the same date keep insertion order. An unknown owner is
    /// indistinguishable from an owner with no entries: both yield an
    /// empty vec.
    pub fn get_entries_for_owner(&self, owner_id: &str) -> Result<Vec<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM entries WHERE owner_id = ? ORDER BY date DESC, rowid ASC",
        )?;
        let entries = stmt
            .query_map([owner_id], Self::row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Distinct calendar dates with at least one entry, newest first.
    ///
    /// Dedicated scan for streak and missed-day logic, which must ignore
    /// any active filters.
    pub fn distinct_entry_dates(&self, owner_id: &str) -> Result<Vec<NaiveDate>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT date FROM entries WHERE owner_id = ? ORDER BY date DESC",
        )?;
        let dates = stmt
            .query_map([owner_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // Rows that fail to parse as dates are skipped rather than failing
        // the whole scan.
        Ok(dates
            .into_iter()
            .filter_map(|s| s.parse::<NaiveDate>().ok())
            .collect())
    }

    /// Count entries for one owner.
    pub fn entry_count(&self, owner_id: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE owner_id = ?",
            [owner_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    fn row_to_entry(row: &Row) -> rusqlite::Result<JournalEntry> {
        let date_str: String = row.get("date")?;
        Ok(JournalEntry {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            date: date_str.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    row.as_ref().column_index("date").unwrap_or(0),
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            title: row.get("title")?,
            content: row.get("content")?,
            primary_mood: row.get("primary_mood")?,
            secondary_mood_a: row.get("secondary_mood_a")?,
            secondary_mood_b: row.get("secondary_mood_b")?,
            category: row.get("category")?,
            tags_json: row.get("tags")?,
            word_count: row.get("word_count")?,
        })
    }
}
