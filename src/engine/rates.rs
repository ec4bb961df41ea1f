use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;

use crate::models::RateHistory;

/// Rate effective at `as_of`: the latest entry dated on or before `as_of`.
/// Among entries sharing a date the last-inserted one wins. An empty
/// history, or one whose entries are all in the future, resolves to zero —
/// a brand-new task with no sell rate yet is a normal state, not an error.
pub fn resolve_rate(history: &RateHistory, as_of: NaiveDate) -> BigDecimal {
    let entries = history.entries();
    let idx = entries.partition_point(|e| e.date <= as_of);
    if idx == 0 {
        return BigDecimal::zero();
    }
    entries[idx - 1].rate.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn empty_history_resolves_to_zero() {
        let history = RateHistory::new();
        assert_eq!(resolve_rate(&history, date(2026, 1, 1)), BigDecimal::zero());
    }

    #[test]
    fn resolves_rate_in_effect_per_date_band() {
        let mut history = RateHistory::new();
        history.add(date(2026, 1, 1), dec("100"));
        history.add(date(2026, 3, 1), dec("110"));
        history.add(date(2026, 6, 1), dec("125"));

        assert_eq!(resolve_rate(&history, date(2025, 12, 31)), BigDecimal::zero());
        assert_eq!(resolve_rate(&history, date(2026, 1, 1)), dec("100"));
        assert_eq!(resolve_rate(&history, date(2026, 2, 28)), dec("100"));
        assert_eq!(resolve_rate(&history, date(2026, 3, 1)), dec("110"));
        assert_eq!(resolve_rate(&history, date(2026, 5, 31)), dec("110"));
        assert_eq!(resolve_rate(&history, date(2026, 6, 1)), dec("125"));
        assert_eq!(resolve_rate(&history, date(2027, 1, 1)), dec("125"));
    }

    #[test]
    fn all_future_entries_resolve_to_zero() {
        let mut history = RateHistory::new();
        history.add(date(2026, 6, 1), dec("95"));
        assert_eq!(resolve_rate(&history, date(2026, 5, 31)), BigDecimal::zero());
    }

    #[test]
    fn last_inserted_entry_wins_on_duplicate_date() {
        let mut history = RateHistory::new();
        history.add(date(2026, 1, 1), dec("100"));
        history.add(date(2026, 1, 1), dec("105"));
        assert_eq!(resolve_rate(&history, date(2026, 1, 1)), dec("105"));

        // Inserting out of order does not disturb the tie-break.
        let mut history = RateHistory::new();
        history.add(date(2026, 2, 1), dec("200"));
        history.add(date(2026, 1, 1), dec("100"));
        history.add(date(2026, 1, 1), dec("105"));
        assert_eq!(resolve_rate(&history, date(2026, 1, 15)), dec("105"));
        assert_eq!(resolve_rate(&history, date(2026, 2, 1)), dec("200"));
    }
}
