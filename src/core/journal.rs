use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::matches_search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Anxious,
    Calm,
    Angry,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Self::Happy,
        Self::Sad,
        Self::Excited,
        Self::Anxious,
        Self::Calm,
        Self::Angry,
        Self::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Excited => "Excited",
            Self::Anxious => "Anxious",
            Self::Calm => "Calm",
            Self::Angry => "Angry",
            Self::Neutral => "Neutral",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Option<u64>,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub date: NaiveDate,
    pub tags: Vec<String>,
}

impl JournalEntry {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: String::new(),
            mood: Mood::Neutral,
            date,
            tags: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The deduplicated tag vocabulary across all entries, in first-seen order.
pub fn all_tags(entries: &[JournalEntry]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for entry in entries {
        for tag in &entry.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    pub mood: Option<Mood>,
    pub tag: Option<String>,
    pub search: String,
}

impl JournalFilter {
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if self.mood.is_some_and(|m| entry.mood != m) {
            return false;
        }
        if self.tag.as_deref().is_some_and(|t| !entry.has_tag(t)) {
            return false;
        }
        matches_search(&self.search, &[&entry.title, &entry.content])
    }

    pub fn apply<'a>(&self, entries: &'a [JournalEntry]) -> Vec<&'a JournalEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}
