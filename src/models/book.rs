//! Book model and the lending state machine

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

use super::loan::LendingRecord;

/// Identifier for a book in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookId(pub i32);

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty book title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookName(String);

impl BookName {
    pub fn new(name: &str) -> AppResult<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::BadRequest("Book name cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lending state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    Issued,
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        };
        write!(f, "{}", label)
    }
}

/// A cataloged book: identity plus the current lending state.
///
/// At most one [`LendingRecord`] is active at a time; the only way in or
/// out of the `Issued` state is [`Book::issue`] / [`Book::take_return`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: BookName,
    pub tags: BTreeSet<String>,
    #[serde(default)]
    loan: Option<LendingRecord>,
}

impl Book {
    pub fn new(id: BookId, name: BookName, tags: BTreeSet<String>) -> Self {
        Self {
            id,
            name,
            tags,
            loan: None,
        }
    }

    pub fn status(&self) -> BookStatus {
        if self.loan.is_some() {
            BookStatus::Issued
        } else {
            BookStatus::Available
        }
    }

    pub fn lending_record(&self) -> Option<&LendingRecord> {
        self.loan.as_ref()
    }

    /// Attach a lending record, moving the book to `Issued`.
    pub(crate) fn issue(&mut self, record: LendingRecord) -> AppResult<()> {
        if self.loan.is_some() {
            return Err(AppError::BookAlreadyIssued(self.name.to_string()));
        }
        self.loan = Some(record);
        Ok(())
    }

    /// Detach the active lending record, moving the book back to `Available`.
    pub(crate) fn take_return(&mut self) -> AppResult<LendingRecord> {
        self.loan
            .take()
            .ok_or_else(|| AppError::BookNotIssued(self.name.to_string()))
    }

    /// Whether the active loan has run past the allowed period.
    ///
    /// A book with no active loan is never overdue.
    pub fn is_overdue(&self, as_of: NaiveDate, loan_period_days: i64) -> bool {
        self.loan
            .as_ref()
            .map(|record| record.is_overdue(as_of, loan_period_days))
            .unwrap_or(false)
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Book name cannot be empty"))]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::PersonId;

    fn sample_book() -> Book {
        Book::new(BookId(1), BookName::new("Dune").unwrap(), BTreeSet::new())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_book_name_rejects_empty() {
        assert!(BookName::new("").is_err());
        assert!(BookName::new("   ").is_err());
        assert_eq!(BookName::new(" Dune ").unwrap().as_str(), "Dune");
    }

    #[test]
    fn test_new_book_is_available() {
        let book = sample_book();
        assert_eq!(book.status(), BookStatus::Available);
        assert!(book.lending_record().is_none());
        assert!(!book.is_overdue(date(2030, 1, 1), 14));
    }

    #[test]
    fn test_issue_attaches_record() {
        let mut book = sample_book();
        book.issue(LendingRecord::new(date(2024, 1, 1), PersonId(7)))
            .unwrap();
        assert_eq!(book.status(), BookStatus::Issued);
        assert_eq!(book.lending_record().unwrap().borrower, PersonId(7));
    }

    #[test]
    fn test_double_issue_fails_and_keeps_state() {
        let mut book = sample_book();
        book.issue(LendingRecord::new(date(2024, 1, 1), PersonId(7)))
            .unwrap();
        let err = book
            .issue(LendingRecord::new(date(2024, 2, 1), PersonId(8)))
            .unwrap_err();
        assert!(matches!(err, AppError::BookAlreadyIssued(_)));
        // First record untouched.
        assert_eq!(book.lending_record().unwrap().issue_date, date(2024, 1, 1));
    }

    #[test]
    fn test_return_clears_record() {
        let mut book = sample_book();
        book.issue(LendingRecord::new(date(2024, 1, 1), PersonId(7)))
            .unwrap();
        let record = book.take_return().unwrap();
        assert_eq!(record.borrower, PersonId(7));
        assert_eq!(book.status(), BookStatus::Available);
        assert!(matches!(
            book.take_return().unwrap_err(),
            AppError::BookNotIssued(_)
        ));
    }

    #[test]
    fn test_reissue_after_return_gets_fresh_record() {
        let mut book = sample_book();
        book.issue(LendingRecord::new(date(2024, 1, 1), PersonId(7)))
            .unwrap();
        book.take_return().unwrap();
        book.issue(LendingRecord::new(date(2024, 3, 1), PersonId(9)))
            .unwrap();
        let record = book.lending_record().unwrap();
        assert_eq!(record.issue_date, date(2024, 3, 1));
        assert_eq!(record.borrower, PersonId(9));
    }

    #[test]
    fn test_overdue_follows_record() {
        let mut book = sample_book();
        book.issue(LendingRecord::new(date(2024, 1, 1), PersonId(7)))
            .unwrap();
        assert!(book.is_overdue(date(2024, 1, 21), 14));
        assert!(!book.is_overdue(date(2024, 1, 10), 14));
    }
}
