//! Analytics and filtering for daybook
//!
//! Two read-only consumers of the entry store, composed linearly:
//!
//! - [`FilterEngine`] produces the ordered subset of one owner's entries
//!   matching optional, conjunctive predicates (dates, moods, tags, text).
//! - [`AnalyticsEngine`] computes derived statistics over the full or
//!   filtered set: streaks, mood distribution and frequency, tag and
//!   category frequency, and the monthly word-count trend.
//!
//! The filter engine is the leaf; the analytics engine uses it for
//! date-bounded queries but runs its own full-history scans for streaks.

pub mod filter;
pub mod insights;

pub use filter::{EntryFilter, FilterEngine};
pub use insights::{
    AnalyticsEngine, MoodDistribution, DEFAULT_MISSED_DAYS_RANGE, DEFAULT_TREND_MONTHS,
};
