//! Data models for the circulation core

pub mod book;
pub mod loan;
pub mod membership;
pub mod person;

// Re-export commonly used types
pub use book::{Book, BookId, BookName, BookStatus, CreateBook};
pub use loan::LendingRecord;
pub use membership::Membership;
pub use person::{CreatePerson, Person, PersonId};
