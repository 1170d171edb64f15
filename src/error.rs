use thiserror::Error;

/// Failures surfaced by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A book with the same id is already registered
    #[error("book id already exists: {0}")]
    BookExists(String),
    /// A user with the same id is already registered
    #[error("user id already exists: {0}")]
    UserExists(String),
    /// No book matched the given id or query
    #[error("no books found matching: {0}")]
    BookNotFound(String),
    /// No user is registered under the given id
    #[error("user not found: {0}")]
    UserNotFound(String),
    /// Copies of the book are still checked out
    #[error("book {0} still has copies on loan")]
    BookOnLoan(String),
    /// Every copy of the book is currently checked out
    #[error("book {0} is not available")]
    BookUnavailable(String),
    /// The student already holds the maximum number of books
    #[error("maximum borrowing limit reached ({0} books)")]
    BorrowLimitReached(usize),
    /// The student already has this book checked out
    #[error("book {book_id} is already borrowed by {user_id}")]
    AlreadyBorrowed {
        /// Id of the student holding the book
        user_id: String,
        /// Id of the book
        book_id: String,
    },
    /// The student does not currently have this book
    #[error("book {book_id} is not borrowed by {user_id}")]
    NotBorrowed {
        /// Id of the student
        user_id: String,
        /// Id of the book
        book_id: String,
    },
    /// The operation requires a student
    #[error("user {0} is not a student")]
    NotAStudent(String),
    /// The operation requires a librarian
    #[error("user {0} is not a librarian")]
    NotALibrarian(String),
    /// Error occurred while saving catalog state
    #[error("persistence error: {0}")]
    Persistence(String),
    /// Error occurred while loading catalog state
    #[error("load error: {0}")]
    Load(String),
}

/// Convenience alias for catalog operation results
pub type CatalogResult<T> = Result<T, CatalogError>;
