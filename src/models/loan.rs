//! Lending record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::person::PersonId;

/// The issue event for one active loan: when the book went out and to whom.
///
/// Owned by the [`Book`](super::book::Book) it describes while the loan is
/// active and discarded on return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingRecord {
    pub issue_date: NaiveDate,
    pub borrower: PersonId,
}

impl LendingRecord {
    pub fn new(issue_date: NaiveDate, borrower: PersonId) -> Self {
        Self {
            issue_date,
            borrower,
        }
    }

    /// Whether the loan has run past the allowed period as of the given date.
    ///
    /// Calendar-day arithmetic: overdue iff strictly more than
    /// `loan_period_days` whole days have elapsed since the issue date.
    /// An issue date in the future yields a negative elapsed count and is
    /// never overdue.
    pub fn is_overdue(&self, as_of: NaiveDate, loan_period_days: i64) -> bool {
        (as_of - self.issue_date).num_days() > loan_period_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overdue_after_period_elapsed() {
        let record = LendingRecord::new(date(2024, 1, 1), PersonId(1));
        assert!(record.is_overdue(date(2024, 1, 21), 14));
    }

    #[test]
    fn test_not_overdue_within_period() {
        let record = LendingRecord::new(date(2024, 1, 1), PersonId(1));
        assert!(!record.is_overdue(date(2024, 1, 4), 14));
        // Boundary: exactly the period is still on time.
        assert!(!record.is_overdue(date(2024, 1, 15), 14));
        assert!(record.is_overdue(date(2024, 1, 16), 14));
    }

    #[test]
    fn test_future_issue_date_is_not_overdue() {
        let record = LendingRecord::new(date(2024, 6, 10), PersonId(3));
        assert!(!record.is_overdue(date(2024, 6, 7), 14));
    }
}
