//! Core domain types for daybook
//!
//! These types represent the canonical data model stored by the entry store
//! and consumed by the filter and analytics engines.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Owner** | The user a journal entry belongs to; every query is scoped per-owner |
//! | **Entry** | A dated journal record with moods, category, tags, and content |
//! | **Mood** | A name from the static mood catalog (primary + up to two secondary) |
//! | **Window** | An optional inclusive start/end date pair narrowing a query |
//! | **Streak** | Consecutive calendar days, ending at or adjacent to today, each with ≥1 entry |

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Users
// ============================================

/// A journal account.
///
/// Authentication and registration mechanics live outside the core; this is
/// just the owner record entries are scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (uuid)
    pub id: String,
    /// Display name
    pub name: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

// ============================================
// Journal entries
// ============================================

/// A single journal entry as returned by the store.
///
/// Entries are conceptually one-per-day but uniqueness is not enforced;
/// multiple entries may share a date. The core never mutates an entry, it
/// only reads snapshots and computes over them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier, immutable once assigned
    pub id: String,
    /// Owner this entry belongs to
    pub owner_id: String,
    /// Calendar date of the entry (time-of-day not significant)
    pub date: NaiveDate,
    /// Optional title
    pub title: Option<String>,
    /// Body text, used for word counting
    pub content: String,
    /// Primary mood (required, from the mood catalog)
    pub primary_mood: String,
    /// First secondary mood (optional)
    pub secondary_mood_a: Option<String>,
    /// Second secondary mood (optional)
    pub secondary_mood_b: Option<String>,
    /// Category (optional; empty string is treated as absent)
    pub category: Option<String>,
    /// Raw tag payload: a flat JSON array of strings.
    ///
    /// Kept raw because the tag filter matches against the payload text;
    /// use [`JournalEntry::tags`] for the parsed view.
    pub tags_json: String,
    /// Word count of `content`, recomputed by the store on every save
    pub word_count: i64,
}

impl JournalEntry {
    /// Parse the tag payload into its constituent tag strings.
    ///
    /// Absent, empty, or malformed payloads yield no tags rather than an
    /// error; the store is trusted but old or hand-edited rows are tolerated.
    pub fn tags(&self) -> Vec<String> {
        parse_tags(&self.tags_json)
    }

    /// All non-empty mood slots in order: primary, secondary A, secondary B.
    pub fn moods(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_mood.as_str())
            .chain(self.secondary_mood_a.as_deref())
            .chain(self.secondary_mood_b.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Category, with empty strings normalized to `None`.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Parse a raw tag payload (flat JSON array of strings).
///
/// Non-array payloads and non-string elements are dropped silently.
pub fn parse_tags(payload: &str) -> Vec<String> {
    if payload.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Count the words in entry content.
///
/// A word is a maximal whitespace-delimited non-empty token; space, tab,
/// newline, and carriage return all act as delimiters.
pub fn word_count(content: &str) -> i64 {
    content.split_whitespace().count() as i64
}

// ============================================
// Store inputs
// ============================================

/// Input for creating or updating an entry.
///
/// The store assigns the id on insert and recomputes `word_count` from
/// `content` on every save; callers never supply either.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Owner this entry belongs to
    pub owner_id: String,
    /// Calendar date of the entry
    pub date: NaiveDate,
    /// Optional title
    pub title: Option<String>,
    /// Body text
    pub content: String,
    /// Primary mood
    pub primary_mood: String,
    /// First secondary mood
    pub secondary_mood_a: Option<String>,
    /// Second secondary mood
    pub secondary_mood_b: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Tags as a plain list; the store serializes them to the flat payload
    pub tags: Vec<String>,
}

impl NewEntry {
    /// Minimal entry with just the required fields.
    pub fn new(owner_id: impl Into<String>, date: NaiveDate, content: impl Into<String>, primary_mood: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            date,
            title: None,
            content: content.into(),
            primary_mood: primary_mood.into(),
            secondary_mood_a: None,
            secondary_mood_b: None,
            category: None,
            tags: Vec::new(),
        }
    }
}

// ============================================
// Query windows
// ============================================

/// An optional inclusive date window for analytics queries.
///
/// Bounds apply independently: a start alone means "on or after", an end
/// alone means "on or before". An inverted window (end before start) is a
/// defined empty result, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive start date
    pub start: Option<NaiveDate>,
    /// Inclusive end date
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Unbounded window (matches everything).
    pub fn all() -> Self {
        Self::default()
    }

    /// Closed interval `[start, end]`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Open-ended window starting at `start`.
    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Open-ended window ending at `end`.
    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Whether a date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}
