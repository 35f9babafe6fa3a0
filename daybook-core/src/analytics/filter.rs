//! Filter engine
//!
//! Produces the ordered subset of one owner's entries matching a
//! combination of independent, optional, conjunctive predicates.
//!
//! All operations fetch the owner's full entry set from the store and apply
//! predicates in memory. This keeps predicate semantics independent of
//! store-level query capabilities; per-user entry volumes are years of daily
//! entries, not server-scale data.

use crate::db::Database;
use crate::error::Result;
use crate::types::{DateWindow, JournalEntry};

/// Optional predicates for [`FilterEngine::filter`]. All are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Inclusive lower date bound ("on or after")
    pub start_date: Option<chrono::NaiveDate>,
    /// Inclusive upper date bound ("on or before")
    pub end_date: Option<chrono::NaiveDate>,
    /// Mood names; matches primary or either secondary mood exactly
    pub moods: Vec<String>,
    /// Tag strings; matches as case-insensitive substrings of the raw
    /// tag payload
    pub tags: Vec<String>,
}

impl EntryFilter {
    /// Filter carrying only the date bounds of a window.
    pub fn from_window(window: &DateWindow) -> Self {
        Self {
            start_date: window.start,
            end_date: window.end,
            ..Default::default()
        }
    }

    fn window(&self) -> DateWindow {
        DateWindow {
            start: self.start_date,
            end: self.end_date,
        }
    }

    fn matches(&self, entry: &JournalEntry) -> bool {
        if !self.window().contains(entry.date) {
            return false;
        }

        if !self.moods.is_empty() {
            let matched = self
                .moods
                .iter()
                .any(|m| entry.moods().any(|em| em == m.as_str()));
            if !matched {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let payload = entry.tags_json.to_ascii_lowercase();
            let matched = self
                .tags
                .iter()
                .any(|t| payload.contains(&t.to_ascii_lowercase()));
            if !matched {
                return false;
            }
        }

        true
    }
}

/// Read-only filtering over the entry store.
pub struct FilterEngine<'a> {
    db: &'a Database,
}

impl<'a> FilterEngine<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Free-text search over titles and content.
    ///
    /// Matches case-insensitively (ASCII fold, no locale handling) against
    /// the title, when present, or the content. Results are ordered by date
    /// descending; no match, a blank query, or no signed-in owner all yield
    /// an empty sequence rather than an error.
    pub fn search(&self, owner: Option<&str>, text: &str) -> Result<Vec<JournalEntry>> {
        let Some(owner) = owner else {
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let needle = text.to_ascii_lowercase();
        let entries = self.db.get_entries_for_owner(owner)?;
        let matches: Vec<JournalEntry> = entries
            .into_iter()
            .filter(|e| {
                e.title
                    .as_deref()
                    .map(|t| t.to_ascii_lowercase().contains(&needle))
                    .unwrap_or(false)
                    || e.content.to_ascii_lowercase().contains(&needle)
            })
            .collect();

        tracing::debug!(owner, matches = matches.len(), "Search complete");
        Ok(matches)
    }

    /// Apply date, mood, and tag predicates to one owner's entries.
    ///
    /// Results keep the store's date-descending order; same-date ties keep
    /// store-return order. An inverted date interval yields an empty result.
    pub fn filter(&self, owner: Option<&str>, filter: &EntryFilter) -> Result<Vec<JournalEntry>> {
        let Some(owner) = owner else {
            return Ok(Vec::new());
        };

        let entries = self.db.get_entries_for_owner(owner)?;
        Ok(entries.into_iter().filter(|e| filter.matches(e)).collect())
    }

    /// Entries of one owner inside a date window, for windowed analytics.
    pub fn entries_in_window(
        &self,
        owner: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<JournalEntry>> {
        self.filter(owner, &EntryFilter::from_window(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewEntry;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn seed_db() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        let user = db.create_user("Ada").unwrap();

        let mut beach = NewEntry::new(&user.id, d("2024-01-08"), "A day at the beach", "Happy");
        beach.title = Some("Holiday".to_string());
        beach.tags = vec!["Road Trip".to_string(), "Family".to_string()];
        beach.category = Some("Travel".to_string());
        db.insert_entry(&beach).unwrap();

        let mut work = NewEntry::new(&user.id, d("2024-01-09"), "Deadline pressure all day", "Stressed");
        work.secondary_mood_a = Some("Tired".to_string());
        work.tags = vec!["Work".to_string()];
        work.category = Some("Work".to_string());
        db.insert_entry(&work).unwrap();

        let quiet = NewEntry::new(&user.id, d("2024-01-10"), "Quiet evening reading", "Calm");
        db.insert_entry(&quiet).unwrap();

        (db, user.id)
    }

    #[test]
    fn test_search_title_and_content() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        // Title hit, case-insensitive
        let hits = engine.search(Some(&owner), "holiday").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, d("2024-01-08"));

        // Content hit across entries, newest first
        let hits = engine.search(Some(&owner), "DAY").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].date, d("2024-01-09"));
        assert_eq!(hits[1].date, d("2024-01-08"));

        // No match is empty, not an error
        assert!(engine.search(Some(&owner), "xyzzy").unwrap().is_empty());
    }

    #[test]
    fn test_search_without_owner_or_text() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        assert!(engine.search(None, "day").unwrap().is_empty());
        assert!(engine.search(Some(&owner), "  ").unwrap().is_empty());
    }

    #[test]
    fn test_filter_date_bounds_independent() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        let from = EntryFilter {
            start_date: Some(d("2024-01-09")),
            ..Default::default()
        };
        let hits = engine.filter(Some(&owner), &from).unwrap();
        assert_eq!(hits.len(), 2);

        let until = EntryFilter {
            end_date: Some(d("2024-01-08")),
            ..Default::default()
        };
        let hits = engine.filter(Some(&owner), &until).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, d("2024-01-08"));
    }

    #[test]
    fn test_filter_inverted_interval_is_empty() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        let inverted = EntryFilter {
            start_date: Some(d("2024-01-10")),
            end_date: Some(d("2024-01-05")),
            ..Default::default()
        };
        assert!(engine.filter(Some(&owner), &inverted).unwrap().is_empty());
    }

    #[test]
    fn test_filter_moods_match_secondary() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        // "Tired" only appears as a secondary mood
        let filter = EntryFilter {
            moods: vec!["Tired".to_string()],
            ..Default::default()
        };
        let hits = engine.filter(Some(&owner), &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].primary_mood, "Stressed");

        // Mood names are matched exactly, not case-folded
        let filter = EntryFilter {
            moods: vec!["tired".to_string()],
            ..Default::default()
        };
        assert!(engine.filter(Some(&owner), &filter).unwrap().is_empty());
    }

    #[test]
    fn test_filter_tags_substring_case_insensitive() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        // "trip" matches the stored tag "Road Trip"
        let filter = EntryFilter {
            tags: vec!["trip".to_string()],
            ..Default::default()
        };
        let hits = engine.filter(Some(&owner), &filter).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, d("2024-01-08"));
    }

    #[test]
    fn test_filter_predicates_are_conjunctive() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        let filter = EntryFilter {
            start_date: Some(d("2024-01-09")),
            moods: vec!["Happy".to_string(), "Stressed".to_string()],
            ..Default::default()
        };
        let hits = engine.filter(Some(&owner), &filter).unwrap();
        // "Happy" entry is before the start date, only "Stressed" survives
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].primary_mood, "Stressed");
    }

    #[test]
    fn test_filter_without_owner_is_empty() {
        let (db, _) = seed_db();
        let engine = FilterEngine::new(&db);
        assert!(engine
            .filter(None, &EntryFilter::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unfiltered_returns_all_newest_first() {
        let (db, owner) = seed_db();
        let engine = FilterEngine::new(&db);

        let hits = engine.filter(Some(&owner), &EntryFilter::default()).unwrap();
        let dates: Vec<_> = hits.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d("2024-01-10"), d("2024-01-09"), d("2024-01-08")]);
    }
}
