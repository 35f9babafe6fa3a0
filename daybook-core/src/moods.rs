//! Static mood catalog
//!
//! The catalog maps every known mood name to exactly one of three
//! categories. It is reference data shared process-wide: constructed once,
//! never mutated at runtime. The analytics engine takes the catalog as an
//! explicit dependency so tests can substitute a smaller one.

use std::collections::HashMap;

/// The three fixed mood categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodCategory {
    Positive,
    Neutral,
    Negative,
}

impl MoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Positive => "positive",
            MoodCategory::Neutral => "neutral",
            MoodCategory::Negative => "negative",
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(MoodCategory::Positive),
            "neutral" => Ok(MoodCategory::Neutral),
            "negative" => Ok(MoodCategory::Negative),
            _ => Err(format!("unknown mood category: {}", s)),
        }
    }
}

/// Builtin mood vocabulary: (name, category).
const BUILTIN_MOODS: &[(&str, MoodCategory)] = &[
    // Positive
    ("Happy", MoodCategory::Positive),
    ("Excited", MoodCategory::Positive),
    ("Grateful", MoodCategory::Positive),
    ("Relaxed", MoodCategory::Positive),
    ("Content", MoodCategory::Positive),
    ("Proud", MoodCategory::Positive),
    ("Optimistic", MoodCategory::Positive),
    // Neutral
    ("Calm", MoodCategory::Neutral),
    ("Indifferent", MoodCategory::Neutral),
    ("Tired", MoodCategory::Neutral),
    ("Bored", MoodCategory::Neutral),
    ("Curious", MoodCategory::Neutral),
    // Negative
    ("Sad", MoodCategory::Negative),
    ("Angry", MoodCategory::Negative),
    ("Anxious", MoodCategory::Negative),
    ("Stressed", MoodCategory::Negative),
    ("Frustrated", MoodCategory::Negative),
    ("Lonely", MoodCategory::Negative),
    ("Guilty", MoodCategory::Negative),
];

/// Immutable mood name → category lookup table.
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    moods: HashMap<String, MoodCategory>,
}

impl MoodCatalog {
    /// Catalog with the builtin vocabulary.
    pub fn builtin() -> Self {
        Self::from_pairs(
            BUILTIN_MOODS
                .iter()
                .map(|(name, cat)| (name.to_string(), *cat)),
        )
    }

    /// Catalog from arbitrary (name, category) pairs, mainly for tests.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, MoodCategory)>) -> Self {
        Self {
            moods: pairs.into_iter().collect(),
        }
    }

    /// Categorize a mood name by exact, case-sensitive match.
    ///
    /// Unknown names return `None`: they are excluded from the three-bucket
    /// distribution but still show up in raw frequency counts.
    pub fn category_of(&self, mood: &str) -> Option<MoodCategory> {
        self.moods.get(mood).copied()
    }

    /// Whether the catalog knows this mood name.
    pub fn contains(&self, mood: &str) -> bool {
        self.moods.contains_key(mood)
    }

    /// Number of moods in the catalog.
    pub fn len(&self) -> usize {
        self.moods.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
