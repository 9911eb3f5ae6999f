//! Person model and related types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::book::BookId;
use super::membership::Membership;

/// Identifier for a person in the contact book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i32);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contact-book entry, carrying the lending-relevant membership facet.
///
/// `borrowed` is a non-owning index over the books this person currently
/// holds. It is written only by the lending service's issue and return
/// operations, together with the book-side record; readers get a view via
/// [`Person::borrowed_books`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub membership: Membership,
    pub tags: BTreeSet<String>,
    // Derived from the book-side records; rebuilt on load rather than
    // persisted, so the two views cannot disagree.
    #[serde(skip)]
    borrowed: BTreeSet<BookId>,
}

impl Person {
    pub fn new(id: PersonId, request: &CreatePerson, membership: Membership) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            address: request.address.clone(),
            membership,
            tags: request.tags.iter().cloned().collect(),
            borrowed: BTreeSet::new(),
        }
    }

    /// Replace the membership status wholesale.
    ///
    /// Existing loans are untouched; eligibility is checked only at
    /// issue time.
    pub fn set_membership(&mut self, membership: Membership) {
        self.membership = membership;
    }

    /// Read-only view of the books this person currently holds.
    pub fn borrowed_books(&self) -> &BTreeSet<BookId> {
        &self.borrowed
    }

    pub(crate) fn record_borrow(&mut self, book: BookId) {
        self.borrowed.insert(book);
    }

    pub(crate) fn record_return(&mut self, book: BookId) {
        self.borrowed.remove(&book);
    }
}

/// Create person request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePerson {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    /// Membership status literal: ACTIVE, EXPIRED or NON-MEMBER.
    pub membership: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
