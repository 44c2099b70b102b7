// Completed analysis results and the session history that holds them.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::emotion::Emotion;

/// Identifier of an [`Entry`], unique within one controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One completed analysis. Fields are private so an entry cannot change
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: EntryId,
    prediction: Emotion,
    advice: String,
    original_text: String,
    created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(id: EntryId, prediction: Emotion, advice: String, original_text: String) -> Self {
        Entry {
            id,
            prediction,
            advice,
            original_text,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn prediction(&self) -> &Emotion {
        &self.prediction
    }

    pub fn advice(&self) -> &str {
        &self.advice
    }

    /// The text that was actually submitted, which may differ from the
    /// current draft if the user kept typing while the request ran.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered record of completed analyses, newest first.
///
/// Entries are never removed, deduplicated, or reordered, and there is no
/// cap: memory grows with the number of analyses in the session.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: VecDeque<Entry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` at the front and return the updated sequence.
    pub fn append(&mut self, entry: Entry) -> &VecDeque<Entry> {
        self.entries.push_front(entry);
        &self.entries
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// All entries, newest first.
    pub fn all(&self) -> &VecDeque<Entry> {
        &self.entries
    }
}

/// Format a history count for display, e.g. "3 entries recorded".
pub fn entries_recorded(count: usize) -> String {
    match count {
        1 => "1 entry recorded".to_string(),
        n => format!("{n} entries recorded"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, label: &str) -> Entry {
        Entry::new(
            EntryId(id),
            Emotion::from_label(label),
            format!("advice {id}"),
            format!("submitted text number {id}"),
        )
    }

    #[test]
    fn new_store_is_empty() {
        let store = HistoryStore::new();
        assert_eq!(store.size(), 0);
        assert!(store.all().is_empty());
    }

    #[test]
    fn append_inserts_at_front() {
        let mut store = HistoryStore::new();
        store.append(entry(1, "joy"));
        let all = store.append(entry(2, "fear"));

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), EntryId(2));
        assert_eq!(all[1].id(), EntryId(1));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut store = HistoryStore::new();
        store.append(entry(1, "joy"));
        store.append(entry(1, "joy"));
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn earlier_entries_keep_their_order() {
        let mut store = HistoryStore::new();
        for id in 1..=5 {
            store.append(entry(id, "neutral"));
        }
        let ids: Vec<u64> = store.all().iter().map(|e| e.id().0).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn entry_accessors_return_constructed_values() {
        let e = entry(7, "surprise");
        assert_eq!(e.id(), EntryId(7));
        assert_eq!(e.prediction(), &Emotion::Surprise);
        assert_eq!(e.advice(), "advice 7");
        assert_eq!(e.original_text(), "submitted text number 7");
        assert!(e.created_at() <= Utc::now());
    }

    #[test]
    fn entries_recorded_pluralizes() {
        assert_eq!(entries_recorded(0), "0 entries recorded");
        assert_eq!(entries_recorded(1), "1 entry recorded");
        assert_eq!(entries_recorded(2), "2 entries recorded");
    }

    #[test]
    fn entry_id_displays_with_hash() {
        assert_eq!(EntryId(12).to_string(), "#12");
    }
}
