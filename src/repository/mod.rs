//! In-memory catalog store
//!
//! The desktop host keeps the whole contact book and catalog in memory and
//! round-trips it through a JSON file. The repository owns the entities;
//! callers address them by id and mutate through the service layer.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookId, BookName},
        membership::Membership,
        person::{CreatePerson, Person, PersonId},
    },
};

/// Main repository struct holding the in-memory catalog
#[derive(Debug)]
pub struct Repository {
    persons: BTreeMap<PersonId, Person>,
    books: BTreeMap<BookId, Book>,
    next_person_id: i32,
    next_book_id: i32,
}

/// Serialized form of the catalog.
///
/// Only the authoritative state goes to disk: persons (with their membership
/// literal) and books (with their lending record, if any). The per-person
/// borrowed index is rebuilt from the book records on load.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    persons: Vec<Person>,
    books: Vec<Book>,
}

impl Repository {
    pub fn new() -> Self {
        Self {
            persons: BTreeMap::new(),
            books: BTreeMap::new(),
            next_person_id: 1,
            next_book_id: 1,
        }
    }

    /// Add a person to the contact book
    pub fn add_person(&mut self, request: &CreatePerson, membership: Membership) -> PersonId {
        let id = PersonId(self.next_person_id);
        self.next_person_id += 1;
        self.persons.insert(id, Person::new(id, request, membership));
        id
    }

    /// Add a book to the catalog
    pub fn add_book(&mut self, name: BookName, tags: BTreeSet<String>) -> AppResult<BookId> {
        if self.books.values().any(|b| b.name == name) {
            return Err(AppError::Conflict(format!(
                "Book '{}' already exists",
                name
            )));
        }
        let id = BookId(self.next_book_id);
        self.next_book_id += 1;
        self.books.insert(id, Book::new(id, name, tags));
        Ok(id)
    }

    pub fn person(&self, id: PersonId) -> AppResult<&Person> {
        self.persons
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))
    }

    pub(crate) fn person_mut(&mut self, id: PersonId) -> AppResult<&mut Person> {
        self.persons
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))
    }

    pub fn book(&self, id: BookId) -> AppResult<&Book> {
        self.books
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub(crate) fn book_mut(&mut self, id: BookId) -> AppResult<&mut Book> {
        self.books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Count books currently out on loan
    pub fn count_active_loans(&self) -> usize {
        self.books
            .values()
            .filter(|b| b.lending_record().is_some())
            .count()
    }

    /// Count loans past the allowed period as of the given date
    pub fn count_overdue_loans(&self, as_of: chrono::NaiveDate, loan_period_days: i64) -> usize {
        self.books
            .values()
            .filter(|b| b.is_overdue(as_of, loan_period_days))
            .count()
    }

    /// Write the catalog to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let snapshot = Snapshot {
            persons: self.persons.values().cloned().collect(),
            books: self.books.values().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a catalog from a JSON file, rebuilding the borrowed indexes
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        let mut repository = Repository::new();
        for person in snapshot.persons {
            repository.next_person_id = repository.next_person_id.max(person.id.0 + 1);
            repository.persons.insert(person.id, person);
        }
        for book in snapshot.books {
            repository.next_book_id = repository.next_book_id.max(book.id.0 + 1);
            repository.books.insert(book.id, book);
        }

        // Rebuild the person-side index from the authoritative records.
        let borrows: Vec<(PersonId, BookId)> = repository
            .books
            .values()
            .filter_map(|b| b.lending_record().map(|r| (r.borrower, b.id)))
            .collect();
        for (borrower, book) in borrows {
            repository.person_mut(borrower)?.record_borrow(book);
        }

        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_person(name: &str) -> CreatePerson {
        CreatePerson {
            name: name.to_string(),
            phone: None,
            email: None,
            address: None,
            membership: "ACTIVE".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut repository = Repository::new();
        let a = repository.add_person(&create_person("A"), Membership::Active);
        let b = repository.add_person(&create_person("B"), Membership::Expired);
        assert_eq!(a, PersonId(1));
        assert_eq!(b, PersonId(2));
    }

    #[test]
    fn test_duplicate_book_name_rejected() {
        let mut repository = Repository::new();
        repository
            .add_book(BookName::new("Dune").unwrap(), BTreeSet::new())
            .unwrap();
        let err = repository
            .add_book(BookName::new("Dune").unwrap(), BTreeSet::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let repository = Repository::new();
        assert!(matches!(
            repository.person(PersonId(42)).unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            repository.book(BookId(42)).unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_loan_counts_over_empty_catalog() {
        let repository = Repository::new();
        assert_eq!(repository.count_active_loans(), 0);
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(repository.count_overdue_loans(today, 14), 0);
    }
}
