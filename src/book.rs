use std::fmt;

use serde::{Deserialize, Serialize};

/// A catalogued title and its physical copies.
///
/// Availability is never stored separately: a book is available exactly when
/// at least one copy is on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Number of copies currently on the shelf
    copies: u32,
}

impl Book {
    /// Create a new book with the given number of shelved copies
    #[must_use]
    pub fn new(id: &str, title: &str, author: &str, copies: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            copies,
        }
    }

    /// Whether at least one copy is on the shelf
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.copies > 0
    }

    /// Number of copies currently on the shelf
    #[must_use]
    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Take one copy off the shelf for a checkout
    pub(crate) fn take_copy(&mut self) {
        self.copies = self.copies.saturating_sub(1);
    }

    /// Put one returned copy back on the shelf
    pub(crate) fn shelve_copy(&mut self) {
        self.copies = self.copies.saturating_add(1);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book ID: {}, Title: {}, Author: {}, Available: {}, Copies: {}",
            self.id,
            self.title,
            self.author,
            self.is_available(),
            self.copies
        )
    }
}
