use serde::{Deserialize, Serialize};

use crate::persistence::TimeStamp;

/// A successful catalog mutation.
///
/// Borrow and return events carry the number of copies left on the shelf so
/// observers can react to availability edges without re-querying the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum CatalogEvent {
    /// A book was added to the registry
    BookAdded {
        /// Id of the added book
        book_id: String,
    },
    /// A book was removed from the registry
    BookRemoved {
        /// Id of the removed book
        book_id: String,
    },
    /// A user joined the registry
    UserRegistered {
        /// Id of the new user
        user_id: String,
    },
    /// A student checked out a copy
    Borrowed {
        /// Id of the borrowing student
        user_id: String,
        /// Id of the borrowed book
        book_id: String,
        /// Copies left on the shelf after the checkout
        copies_left: u32,
    },
    /// A student returned a copy
    Returned {
        /// Id of the returning student
        user_id: String,
        /// Id of the returned book
        book_id: String,
        /// Copies on the shelf after the return
        copies_left: u32,
    },
}

/// A timestamped entry in the catalog history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventRecord {
    /// What happened
    pub event: CatalogEvent,
    /// When it happened
    pub timestamp: TimeStamp,
}
