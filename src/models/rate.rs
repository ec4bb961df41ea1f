use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical rate change. Rate changes are appended, never edited in
/// place; history answers "rate effective as of a date" queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub date: NaiveDate,
    pub rate: BigDecimal, // NUMERIC(10,2)
}

/// Rate changes kept sorted ascending by date, insertion order preserved
/// among entries sharing a date. Duplicate dates are allowed; the
/// last-inserted entry for a date wins at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RateEntry>", into = "Vec<RateEntry>")]
pub struct RateHistory {
    entries: Vec<RateEntry>,
}

impl RateHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from entries in arbitrary order.
    pub fn from_entries(entries: impl IntoIterator<Item = RateEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        history
    }

    /// Insert keeping entries sorted by date. A new entry lands after any
    /// existing entries with the same date.
    pub fn push(&mut self, entry: RateEntry) {
        let idx = self.entries.partition_point(|e| e.date <= entry.date);
        self.entries.insert(idx, entry);
    }

    pub fn add(&mut self, date: NaiveDate, rate: BigDecimal) {
        self.push(RateEntry { date, rate });
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<Vec<RateEntry>> for RateHistory {
    fn from(entries: Vec<RateEntry>) -> Self {
        RateHistory::from_entries(entries)
    }
}

impl From<RateHistory> for Vec<RateEntry> {
    fn from(history: RateHistory) -> Self {
        history.entries
    }
}
