//! Analytics engine
//!
//! Computes derived statistics over one owner's journal entries: mood
//! distribution and frequency, writing streaks, missed days, tag and
//! category frequency, and the monthly word-count trend.
//!
//! Windowed statistics apply their date bounds through the
//! [`FilterEngine`]; streaks and the word-count trend always scan the
//! owner's full history, because a streak about "days since last gap" is
//! meaningless if artificially windowed.
//!
//! Every operation is a pure, stateless read: no current owner means the
//! identity/empty value, never an error, so the surface is safe to call
//! speculatively from a UI layer. Store-level failures propagate.

use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::{HashMap, HashSet};

use crate::analytics::filter::FilterEngine;
use crate::db::Database;
use crate::error::Result;
use crate::moods::{MoodCatalog, MoodCategory};
use crate::types::DateWindow;

/// Default range for the missed-days statistic, in days before today.
pub const DEFAULT_MISSED_DAYS_RANGE: i64 = 30;

/// Default number of calendar months in the word-count trend.
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Primary-mood counts bucketed into the three fixed categories.
///
/// All three buckets are always present. Entries whose primary mood is not
/// in the catalog contribute to none of them, so the bucket sum can be less
/// than the entry count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodDistribution {
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
}

impl MoodDistribution {
    /// Sum of all three buckets.
    pub fn total(&self) -> i64 {
        self.positive + self.neutral + self.negative
    }

    /// Bucket count for a category.
    pub fn get(&self, category: MoodCategory) -> i64 {
        match category {
            MoodCategory::Positive => self.positive,
            MoodCategory::Neutral => self.neutral,
            MoodCategory::Negative => self.negative,
        }
    }
}

/// Read-only analytics over the entry store.
///
/// The mood catalog is an explicit dependency rather than an implicit
/// global so tests can substitute a smaller vocabulary.
pub struct AnalyticsEngine<'a> {
    db: &'a Database,
    catalog: &'a MoodCatalog,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(db: &'a Database, catalog: &'a MoodCatalog) -> Self {
        Self { db, catalog }
    }

    fn filter_engine(&self) -> FilterEngine<'a> {
        FilterEngine::new(self.db)
    }

    // ============================================
    // Mood statistics
    // ============================================

    /// Bucket primary moods into {positive, neutral, negative}.
    ///
    /// Unrecognized primary moods are silently excluded from the buckets
    /// (they still show up in [`AnalyticsEngine::mood_frequency`]).
    pub fn mood_distribution(
        &self,
        owner: Option<&str>,
        window: &DateWindow,
    ) -> Result<MoodDistribution> {
        let entries = self.filter_engine().entries_in_window(owner, window)?;

        let mut distribution = MoodDistribution::default();
        for entry in &entries {
            match self.catalog.category_of(&entry.primary_mood) {
                Some(MoodCategory::Positive) => distribution.positive += 1,
                Some(MoodCategory::Neutral) => distribution.neutral += 1,
                Some(MoodCategory::Negative) => distribution.negative += 1,
                None => {
                    tracing::debug!(
                        mood = entry.primary_mood,
                        "Primary mood not in catalog, excluded from distribution"
                    );
                }
            }
        }
        Ok(distribution)
    }

    /// Occurrence counts per mood name across all three mood slots.
    ///
    /// Sorted by descending count; ties keep first-encounter order from the
    /// date-descending scan (the documented deterministic tie rule). Counts
    /// go by literal mood name, catalog membership is not required.
    pub fn mood_frequency(
        &self,
        owner: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<(String, i64)>> {
        let entries = self.filter_engine().entries_in_window(owner, window)?;
        Ok(ranked_counts(
            entries
                .iter()
                .flat_map(|e| e.moods().map(str::to_string)),
        ))
    }

    /// The single most frequent mood, or `None` for an empty history.
    pub fn most_frequent_mood(
        &self,
        owner: Option<&str>,
        window: &DateWindow,
    ) -> Result<Option<String>> {
        Ok(self
            .mood_frequency(owner, window)?
            .into_iter()
            .next()
            .map(|(mood, _)| mood))
    }

    // ============================================
    // Streaks (always full history)
    // ============================================

    /// Consecutive days journaled, ending at today or yesterday.
    ///
    /// A user who journaled yesterday but not yet today still has an active
    /// streak; the count is 0 only when neither today nor yesterday has an
    /// entry. This grace day is a deliberate product choice.
    pub fn current_streak(&self, owner: Option<&str>) -> Result<i64> {
        self.current_streak_on(owner, Local::now().date_naive())
    }

    /// [`AnalyticsEngine::current_streak`] anchored at an explicit date.
    pub fn current_streak_on(&self, owner: Option<&str>, today: NaiveDate) -> Result<i64> {
        let Some(owner) = owner else {
            return Ok(0);
        };

        let dates: HashSet<NaiveDate> =
            self.db.distinct_entry_dates(owner)?.into_iter().collect();

        let mut cursor = if dates.contains(&today) {
            today
        } else {
            today - Duration::days(1)
        };

        let mut streak = 0;
        while dates.contains(&cursor) {
            streak += 1;
            cursor -= Duration::days(1);
        }
        Ok(streak)
    }

    /// Longest run of consecutive journaled days anywhere in history.
    ///
    /// At least 1 when any entries exist, 0 otherwise. Independent of today,
    /// so `longest_streak() >= current_streak()` always holds.
    pub fn longest_streak(&self, owner: Option<&str>) -> Result<i64> {
        let Some(owner) = owner else {
            return Ok(0);
        };

        let mut dates = self.db.distinct_entry_dates(owner)?;
        dates.sort_unstable();

        let mut longest = 0i64;
        let mut run = 0i64;
        let mut prev: Option<NaiveDate> = None;
        for date in dates {
            run = match prev {
                Some(p) if date == p + Duration::days(1) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            prev = Some(date);
        }
        Ok(longest)
    }

    /// Days without an entry in `[today - range_days, today]` inclusive.
    ///
    /// An owner with no entries at all misses every day in the range,
    /// `range_days + 1` of them.
    pub fn missed_days(&self, owner: Option<&str>, range_days: i64) -> Result<i64> {
        self.missed_days_on(owner, range_days, Local::now().date_naive())
    }

    /// [`AnalyticsEngine::missed_days`] anchored at an explicit date.
    pub fn missed_days_on(
        &self,
        owner: Option<&str>,
        range_days: i64,
        today: NaiveDate,
    ) -> Result<i64> {
        let Some(owner) = owner else {
            return Ok(0);
        };

        let start = today - Duration::days(range_days);
        let journaled = self
            .db
            .distinct_entry_dates(owner)?
            .into_iter()
            .filter(|d| *d >= start && *d <= today)
            .count() as i64;

        Ok(range_days + 1 - journaled)
    }

    // ============================================
    // Tag and category statistics
    // ============================================

    /// Occurrence counts per exact tag string.
    ///
    /// Malformed tag payloads contribute nothing. Sorted by descending
    /// count, encounter-order ties.
    pub fn tag_frequency(
        &self,
        owner: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<(String, i64)>> {
        let entries = self.filter_engine().entries_in_window(owner, window)?;
        Ok(ranked_counts(entries.iter().flat_map(|e| e.tags())))
    }

    /// Entry counts per non-empty category, descending.
    pub fn category_breakdown(
        &self,
        owner: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<(String, i64)>> {
        let entries = self.filter_engine().entries_in_window(owner, window)?;
        Ok(ranked_counts(
            entries
                .iter()
                .filter_map(|e| e.category().map(str::to_string)),
        ))
    }

    // ============================================
    // Word-count trend (always full history)
    // ============================================

    /// Mean word count per calendar month for the last `months_back` months.
    ///
    /// Buckets are calendar months ending at the current month, labeled
    /// "March 2024" style, in chronological order. Months without entries
    /// average 0 rather than being omitted. Values are rounded to two
    /// decimals, half away from zero.
    pub fn average_word_count_trend(
        &self,
        owner: Option<&str>,
        months_back: u32,
    ) -> Result<Vec<(String, f64)>> {
        self.average_word_count_trend_on(owner, months_back, Local::now().date_naive())
    }

    /// [`AnalyticsEngine::average_word_count_trend`] anchored at an explicit date.
    pub fn average_word_count_trend_on(
        &self,
        owner: Option<&str>,
        months_back: u32,
        today: NaiveDate,
    ) -> Result<Vec<(String, f64)>> {
        let Some(owner) = owner else {
            return Ok(Vec::new());
        };

        let entries = self.db.get_entries_for_owner(owner)?;

        // Sum and count per (year, month) in one pass; the window is months,
        // so the trend deliberately ignores any date filter.
        let mut buckets: HashMap<(i32, u32), (i64, i64)> = HashMap::new();
        for entry in &entries {
            let bucket = buckets
                .entry((entry.date.year(), entry.date.month()))
                .or_insert((0, 0));
            bucket.0 += entry.word_count;
            bucket.1 += 1;
        }

        let mut trend = Vec::with_capacity(months_back as usize);
        for back in (0..months_back).rev() {
            let (year, month) = month_minus(today.year(), today.month(), back);
            let average = match buckets.get(&(year, month)) {
                Some((sum, count)) if *count > 0 => round2(*sum as f64 / *count as f64),
                _ => 0.0,
            };
            trend.push((month_label(year, month), average));
        }
        Ok(trend)
    }
}

/// Count occurrences, preserving first-encounter order for ties.
///
/// The stable sort keeps equal counts in the order the values were first
/// seen during the scan.
fn ranked_counts(values: impl IntoIterator<Item = String>) -> Vec<(String, i64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, i64)> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The calendar month `delta` months before (year, month).
fn month_minus(year: i32, month: u32, delta: u32) -> (i32, u32) {
    let months = year * 12 + month as i32 - 1 - delta as i32;
    (months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
}

/// Human-readable month label, e.g. "March 2024".
fn month_label(year: i32, month: u32) -> String {
    let month_name = match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    };
    format!("{} {}", month_name, year)
}

/// Round to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
