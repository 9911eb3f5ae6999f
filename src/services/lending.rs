//! Lending service: membership-gated issue and return operations
//!
//! All mutation runs under one lock so no caller can observe the book-side
//! record and the borrower's set in disagreement.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookId, BookName, BookStatus, CreateBook},
        loan::LendingRecord,
        membership::Membership,
        person::{CreatePerson, Person, PersonId},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Arc<Mutex<Repository>>,
    loan_period_days: i64,
}

impl LendingService {
    pub fn new(repository: Repository, loan_period_days: i64) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
            loan_period_days,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Repository> {
        // A poisoned lock means a panic mid-read; the catalog itself is
        // still consistent because writers never unwind between the two
        // sides of a mutation.
        self.repository.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a person to the contact book, parsing the membership literal
    pub fn add_person(&self, request: &CreatePerson) -> AppResult<PersonId> {
        request.validate()?;
        let membership: Membership = request.membership.parse()?;
        let id = self.lock().add_person(request, membership);
        tracing::info!(person_id = %id, name = %request.name, "person added");
        Ok(id)
    }

    /// Add a book to the catalog
    pub fn add_book(&self, request: &CreateBook) -> AppResult<BookId> {
        request.validate()?;
        let name = BookName::new(&request.name)?;
        let tags: BTreeSet<String> = request.tags.iter().cloned().collect();
        let id = self.lock().add_book(name, tags)?;
        tracing::info!(book_id = %id, name = %request.name, "book added");
        Ok(id)
    }

    /// Replace a person's membership status
    pub fn set_membership(&self, person_id: PersonId, membership: Membership) -> AppResult<()> {
        let mut repository = self.lock();
        repository.person_mut(person_id)?.set_membership(membership);
        tracing::info!(%person_id, %membership, "membership updated");
        Ok(())
    }

    /// Issue a book to a borrower
    ///
    /// Fails with `IneligibleBorrower` for non-members and
    /// `BookAlreadyIssued` for a book already out; on failure neither the
    /// book nor the borrower is touched.
    pub fn issue_book(
        &self,
        book_id: BookId,
        issue_date: NaiveDate,
        borrower_id: PersonId,
    ) -> AppResult<()> {
        let mut repository = self.lock();

        let borrower = repository.person(borrower_id)?;
        if !borrower.membership.can_borrow() {
            return Err(AppError::IneligibleBorrower(borrower.name.clone()));
        }
        let book = repository.book(book_id)?;
        if book.status() == BookStatus::Issued {
            return Err(AppError::BookAlreadyIssued(book.name.to_string()));
        }

        // Preconditions hold; both sides now change under the same guard.
        repository
            .book_mut(book_id)?
            .issue(LendingRecord::new(issue_date, borrower_id))?;
        repository.person_mut(borrower_id)?.record_borrow(book_id);

        tracing::info!(%book_id, %borrower_id, %issue_date, "book issued");
        Ok(())
    }

    /// Return a borrowed book
    ///
    /// Fails with `BookNotIssued` when the book has no active loan; the
    /// record and the borrower's set are cleared together.
    pub fn return_book(&self, book_id: BookId) -> AppResult<()> {
        let mut repository = self.lock();

        let book = repository.book(book_id)?;
        let borrower_id = book
            .lending_record()
            .ok_or_else(|| AppError::BookNotIssued(book.name.to_string()))?
            .borrower;
        repository.person(borrower_id)?;

        repository.book_mut(book_id)?.take_return()?;
        repository.person_mut(borrower_id)?.record_return(book_id);

        tracing::info!(%book_id, %borrower_id, "book returned");
        Ok(())
    }

    /// Whether a book's loan has run past the configured period.
    ///
    /// A book with no active loan is never overdue.
    pub fn is_overdue(&self, book_id: BookId, as_of: NaiveDate) -> AppResult<bool> {
        let repository = self.lock();
        Ok(repository.book(book_id)?.is_overdue(as_of, self.loan_period_days))
    }

    /// Snapshot of the books a person currently holds
    pub fn borrowed_books(&self, person_id: PersonId) -> AppResult<BTreeSet<BookId>> {
        let repository = self.lock();
        Ok(repository.person(person_id)?.borrowed_books().clone())
    }

    /// Snapshot of a person
    pub fn person(&self, person_id: PersonId) -> AppResult<Person> {
        Ok(self.lock().person(person_id)?.clone())
    }

    /// Snapshot of a book
    pub fn book(&self, book_id: BookId) -> AppResult<Book> {
        Ok(self.lock().book(book_id)?.clone())
    }

    /// Count active loans
    pub fn count_active_loans(&self) -> usize {
        self.lock().count_active_loans()
    }

    /// Count overdue loans as of the given date
    pub fn count_overdue_loans(&self, as_of: NaiveDate) -> usize {
        self.lock().count_overdue_loans(as_of, self.loan_period_days)
    }

    /// Write the catalog to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        self.lock().save(path)
    }
}
