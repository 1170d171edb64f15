use crate::{
    book::Book,
    catalog::Catalog,
    error::{CatalogError, CatalogResult},
    user::{Role, User},
};

/// Borrowing operations performed as a verified student
#[derive(Debug)]
pub struct StudentActions<'a> {
    /// Catalog the student is acting on
    catalog: &'a mut Catalog,
    /// Id of the verified student
    student_id: String,
}

impl StudentActions<'_> {
    /// Check out a book by id
    ///
    /// # Errors
    ///
    /// Forwards [`Catalog::borrow`] failures.
    pub fn borrow(&mut self, book_id: &str) -> CatalogResult<()> {
        self.catalog.borrow(&self.student_id, book_id)
    }

    /// Return a borrowed book
    ///
    /// # Errors
    ///
    /// Forwards [`Catalog::return_book`] failures.
    pub fn return_book(&mut self, book_id: &str) -> CatalogResult<()> {
        self.catalog.return_book(&self.student_id, book_id)
    }

    /// Ids of the books this student currently holds, in checkout order
    #[must_use]
    pub fn borrowed_books(&self) -> Vec<String> {
        self.catalog
            .user(&self.student_id)
            .ok()
            .and_then(User::student_profile)
            .map(|profile| profile.borrowed_books().to_vec())
            .unwrap_or_default()
    }
}

/// Registry management operations performed as a verified librarian
#[derive(Debug)]
pub struct LibrarianActions<'a> {
    /// Catalog the librarian is acting on
    catalog: &'a mut Catalog,
}

impl LibrarianActions<'_> {
    /// Add a book to the registry
    ///
    /// # Errors
    ///
    /// Forwards [`Catalog::add_book`] failures.
    pub fn add_book(&mut self, book: Book) -> CatalogResult<()> {
        self.catalog.add_book(book)
    }

    /// Remove a book from the registry
    ///
    /// # Errors
    ///
    /// Forwards [`Catalog::remove_book`] failures.
    pub fn remove_book(&mut self, book_id: &str) -> CatalogResult<()> {
        self.catalog.remove_book(book_id)
    }

    /// Resolve a query to a single book
    ///
    /// # Errors
    ///
    /// Forwards [`Catalog::search_book`] failures.
    pub fn search_book(&self, query: &str) -> CatalogResult<&Book> {
        self.catalog.search_book(query)
    }
}

impl Catalog {
    /// Act on the catalog as the given student
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserNotFound`] for an unknown id and
    /// [`CatalogError::NotAStudent`] when the user is a librarian.
    pub fn as_student(&mut self, user_id: &str) -> CatalogResult<StudentActions<'_>> {
        let is_student = matches!(self.user(user_id)?.role, Role::Student(_));
        if is_student {
            Ok(StudentActions { catalog: self, student_id: user_id.to_string() })
        } else {
            Err(CatalogError::NotAStudent(user_id.to_string()))
        }
    }

    /// Act on the catalog as the given librarian
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserNotFound`] for an unknown id and
    /// [`CatalogError::NotALibrarian`] when the user is a student.
    pub fn as_librarian(&mut self, user_id: &str) -> CatalogResult<LibrarianActions<'_>> {
        let is_librarian = matches!(self.user(user_id)?.role, Role::Librarian);
        if is_librarian {
            Ok(LibrarianActions { catalog: self })
        } else {
            Err(CatalogError::NotALibrarian(user_id.to_string()))
        }
    }
}
