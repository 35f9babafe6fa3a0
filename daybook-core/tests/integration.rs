//! Integration tests for the daybook entry store, filter engine, and
//! analytics engine.
//!
//! These exercise the full flow through the public API: create users,
//! write entries through the store, then filter and analyze them.

use chrono::{Duration, NaiveDate};
use daybook_core::{
    AnalyticsEngine, Database, DateWindow, EntryFilter, FilterEngine, MoodCatalog, NewEntry,
    SessionContext,
};
use tempfile::TempDir;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn open_db() -> Database {
    let db = Database::open_in_memory().expect("open in-memory db");
    db.migrate().expect("migrate schema");
    db
}

fn entry(owner: &str, date: &str, content: &str, mood: &str) -> NewEntry {
    NewEntry::new(owner, d(date), content, mood)
}

// ============================================
// Store round trips
// ============================================

#[test]
fn test_open_on_disk_and_migrate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal.db");

    let db = Database::open(&path).expect("open on-disk db");
    db.migrate().expect("migrate");

    let user = db.create_user("Ada").unwrap();
    db.insert_entry(&entry(&user.id, "2024-01-10", "first words", "Happy"))
        .unwrap();

    drop(db);

    // Reopen and verify the data survived
    let db = Database::open(&path).unwrap();
    db.migrate().unwrap();
    let entries = db.get_entries_for_owner(&user.id).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].word_count, 2);
}

#[test]
fn test_entries_are_scoped_per_owner() {
    let db = open_db();
    let ada = db.create_user("Ada").unwrap();
    let grace = db.create_user("Grace").unwrap();

    db.insert_entry(&entry(&ada.id, "2024-01-10", "ada writes", "Happy"))
        .unwrap();
    db.insert_entry(&entry(&grace.id, "2024-01-10", "grace writes", "Calm"))
        .unwrap();

    let ada_entries = db.get_entries_for_owner(&ada.id).unwrap();
    assert_eq!(ada_entries.len(), 1);
    assert_eq!(ada_entries[0].content, "ada writes");

    let catalog = MoodCatalog::builtin();
    let analytics = AnalyticsEngine::new(&db, &catalog);
    let freq = analytics
        .mood_frequency(Some(&ada.id), &DateWindow::all())
        .unwrap();
    assert_eq!(freq, vec![("Happy".to_string(), 1)]);
}

// ============================================
// Session context flow
// ============================================

#[test]
fn test_anonymous_session_yields_empty_results() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();
    db.insert_entry(&entry(&user.id, "2024-01-10", "words", "Happy"))
        .unwrap();

    let session = SessionContext::anonymous();
    let catalog = MoodCatalog::builtin();
    let filter = FilterEngine::new(&db);
    let analytics = AnalyticsEngine::new(&db, &catalog);

    assert!(filter.search(session.owner(), "words").unwrap().is_empty());
    assert_eq!(analytics.current_streak(session.owner()).unwrap(), 0);
    assert_eq!(
        analytics
            .mood_distribution(session.owner(), &DateWindow::all())
            .unwrap()
            .total(),
        0
    );
}

#[test]
fn test_signed_in_session_flows_through_engines() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();
    db.insert_entry(&entry(&user.id, "2024-01-10", "morning pages", "Happy"))
        .unwrap();

    let mut session = SessionContext::anonymous();
    session.sign_in(user.id.clone());

    let filter = FilterEngine::new(&db);
    let hits = filter.search(session.owner(), "pages").unwrap();
    assert_eq!(hits.len(), 1);

    session.sign_out();
    assert!(filter.search(session.owner(), "pages").unwrap().is_empty());
}

// ============================================
// Filter + analytics end to end
// ============================================

#[test]
fn test_windowed_analytics_use_filtered_set() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();

    let mut january = entry(&user.id, "2024-01-05", "short note", "Happy");
    january.tags = vec!["Work".to_string()];
    january.category = Some("Work".to_string());
    db.insert_entry(&january).unwrap();

    let mut february = entry(&user.id, "2024-02-05", "a slightly longer note", "Sad");
    february.tags = vec!["Work".to_string(), "Travel".to_string()];
    february.category = Some("Travel".to_string());
    db.insert_entry(&february).unwrap();

    let catalog = MoodCatalog::builtin();
    let analytics = AnalyticsEngine::new(&db, &catalog);

    // Unwindowed: both entries
    let all = analytics
        .tag_frequency(Some(&user.id), &DateWindow::all())
        .unwrap();
    assert_eq!(
        all,
        vec![("Work".to_string(), 2), ("Travel".to_string(), 1)]
    );

    // Windowed to February only
    let feb_window = DateWindow::between(d("2024-02-01"), d("2024-02-29"));
    let feb = analytics.tag_frequency(Some(&user.id), &feb_window).unwrap();
    assert_eq!(
        feb,
        vec![("Work".to_string(), 1), ("Travel".to_string(), 1)]
    );

    let dist = analytics
        .mood_distribution(Some(&user.id), &feb_window)
        .unwrap();
    assert_eq!(dist.positive, 0);
    assert_eq!(dist.negative, 1);

    let breakdown = analytics
        .category_breakdown(Some(&user.id), &feb_window)
        .unwrap();
    assert_eq!(breakdown, vec![("Travel".to_string(), 1)]);
}

#[test]
fn test_streaks_ignore_windows_entirely() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();

    // Five consecutive days; a narrow filter window must not split the run
    for date in [
        "2024-03-06",
        "2024-03-07",
        "2024-03-08",
        "2024-03-09",
        "2024-03-10",
    ] {
        db.insert_entry(&entry(&user.id, date, "daily", "Happy"))
            .unwrap();
    }

    let catalog = MoodCatalog::builtin();
    let analytics = AnalyticsEngine::new(&db, &catalog);

    assert_eq!(
        analytics
            .current_streak_on(Some(&user.id), d("2024-03-10"))
            .unwrap(),
        5
    );
    assert_eq!(analytics.longest_streak(Some(&user.id)).unwrap(), 5);
}

#[test]
fn test_filter_engine_end_before_start_example() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();
    db.insert_entry(&entry(&user.id, "2024-01-07", "words", "Happy"))
        .unwrap();

    let filter = FilterEngine::new(&db);
    let inverted = EntryFilter {
        start_date: Some(d("2024-01-10")),
        end_date: Some(d("2024-01-05")),
        ..Default::default()
    };
    assert!(filter.filter(Some(&user.id), &inverted).unwrap().is_empty());
}

#[test]
fn test_streak_tag_and_word_count_examples() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();

    // Entries today and yesterday (anchored): current streak 2
    let today = d("2024-06-15");
    db.insert_entry(&entry(&user.id, "2024-06-15", "today", "Happy"))
        .unwrap();
    db.insert_entry(&entry(&user.id, "2024-06-14", "yesterday", "Calm"))
        .unwrap();

    let catalog = MoodCatalog::builtin();
    let analytics = AnalyticsEngine::new(&db, &catalog);
    assert_eq!(analytics.current_streak_on(Some(&user.id), today).unwrap(), 2);

    // Tag example: ["Work","Travel"] and ["Travel"]
    let mut both = entry(&user.id, "2024-06-13", "x", "Happy");
    both.tags = vec!["Work".to_string(), "Travel".to_string()];
    db.insert_entry(&both).unwrap();
    let mut travel = entry(&user.id, "2024-06-12", "y", "Calm");
    travel.tags = vec!["Travel".to_string()];
    db.insert_entry(&travel).unwrap();

    let freq = analytics
        .tag_frequency(Some(&user.id), &DateWindow::all())
        .unwrap();
    assert_eq!(
        freq,
        vec![("Travel".to_string(), 2), ("Work".to_string(), 1)]
    );

    // Word count example: "  a  b\tc\n" has 3 words
    let stored = db
        .insert_entry(&entry(&user.id, "2024-06-11", "  a  b\tc\n", "Happy"))
        .unwrap();
    assert_eq!(stored.word_count, 3);
}

#[test]
fn test_distribution_bound_property() {
    let db = open_db();
    let user = db.create_user("Ada").unwrap();

    let moods = ["Happy", "Calm", "Sad", "NotARealMood", "Happy"];
    let mut date = d("2024-05-01");
    for mood in moods {
        db.insert_entry(&entry(&user.id, &date.to_string(), "x", mood))
            .unwrap();
        date += Duration::days(1);
    }

    let catalog = MoodCatalog::builtin();
    let analytics = AnalyticsEngine::new(&db, &catalog);

    let dist = analytics
        .mood_distribution(Some(&user.id), &DateWindow::all())
        .unwrap();
    let total_entries = db.entry_count(&user.id).unwrap();

    // Unknown moods drop out of the distribution but not the frequency
    assert!(dist.total() < total_entries);
    let freq = analytics
        .mood_frequency(Some(&user.id), &DateWindow::all())
        .unwrap();
    assert!(freq.iter().any(|(m, _)| m == "NotARealMood"));
    let slot_total: i64 = freq.iter().map(|(_, c)| c).sum();
    assert_eq!(slot_total, total_entries);
}
