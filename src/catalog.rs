use std::{
    collections::BTreeMap,
    fmt,
    fs::File,
    io::{Read, Write},
    path::Path,
};

use crate::{
    book::Book,
    config::CatalogConfig,
    error::{CatalogError, CatalogResult},
    events::{CatalogEvent, EventRecord},
    observers::{AvailabilityAlert, CatalogObserver, EventLogger},
    persistence::{CatalogSnapshot, TimeStamp},
    user::{StudentProfile, User},
};

/// In-memory book and user registries with lending rules.
///
/// Registries are keyed by id and iterate in id order, which makes fuzzy
/// search resolution and report output deterministic.
pub struct Catalog {
    /// Registered books, keyed by book id
    books: BTreeMap<String, Book>,
    /// Registered users, keyed by user id
    users: BTreeMap<String, User>,
    /// Bounded record of successful mutations, oldest first
    history: Vec<EventRecord>,
    /// Limits the catalog enforces
    config: CatalogConfig,
    /// Registered event observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

// Manual implementation of Debug because observers are trait objects
impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.books)
            .field("users", &self.users)
            .field("history", &self.history)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create an empty catalog with the given limits
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            books: BTreeMap::new(),
            users: BTreeMap::new(),
            history: Vec::new(),
            config,
            observers: Vec::new(),
        }
    }

    /// Limits the catalog is enforcing
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Register an observer to be notified after every successful mutation
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Add a book to the registry
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BookExists`] if a book with the same id is
    /// already registered.
    pub fn add_book(&mut self, book: Book) -> CatalogResult<()> {
        if self.books.contains_key(&book.id) {
            return Err(CatalogError::BookExists(book.id));
        }

        let book_id = book.id.clone();
        self.books.insert(book_id.clone(), book);
        self.record_event(CatalogEvent::BookAdded { book_id });
        Ok(())
    }

    /// Remove a book from the registry
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] if the id is unknown and
    /// [`CatalogError::BookOnLoan`] while any student still has the book
    /// checked out; removing it then would leave dangling borrowed ids.
    pub fn remove_book(&mut self, book_id: &str) -> CatalogResult<()> {
        if !self.books.contains_key(book_id) {
            return Err(CatalogError::BookNotFound(book_id.to_string()));
        }

        let on_loan = self
            .users
            .values()
            .any(|user| user.student_profile().is_some_and(|profile| profile.has_borrowed(book_id)));
        if on_loan {
            return Err(CatalogError::BookOnLoan(book_id.to_string()));
        }

        self.books.remove(book_id);
        self.record_event(CatalogEvent::BookRemoved { book_id: book_id.to_string() });
        Ok(())
    }

    /// Look up a book by exact id
    #[must_use]
    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.books.get(book_id)
    }

    /// Iterate all books in id order
    #[must_use]
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Iterate all users in id order
    #[must_use]
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Resolve a query to a single book.
    ///
    /// An exact id match always wins. Otherwise the query is compared
    /// case-insensitively against titles and authors; when several books
    /// match, the first in id order is returned and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] if nothing matches.
    pub fn search_book(&self, query: &str) -> CatalogResult<&Book> {
        if let Some(book) = self.books.get(query) {
            return Ok(book);
        }

        let mut matches = self.books.values().filter(|book| {
            book.title.eq_ignore_ascii_case(query) || book.author.eq_ignore_ascii_case(query)
        });

        let Some(first) = matches.next() else {
            return Err(CatalogError::BookNotFound(query.to_string()));
        };

        if matches.next().is_some() {
            tracing::warn!(%query, book_id = %first.id, "multiple books matched, returning first");
        }

        Ok(first)
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserExists`] if a user with the same id is
    /// already registered.
    pub fn register_user(&mut self, user: User) -> CatalogResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(CatalogError::UserExists(user.id));
        }

        let user_id = user.id.clone();
        self.users.insert(user_id.clone(), user);
        self.record_event(CatalogEvent::UserRegistered { user_id });
        Ok(())
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserNotFound`] if the id is unknown.
    pub fn user(&self, user_id: &str) -> CatalogResult<&User> {
        self.users.get(user_id).ok_or_else(|| CatalogError::UserNotFound(user_id.to_string()))
    }

    /// Check out a copy of a book to a student.
    ///
    /// The book is resolved strictly by id; fuzzy matching applies to
    /// [`Self::search_book`] only. On success the shelf count decrements and
    /// the book id is appended to the student's lending record, in lockstep.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserNotFound`] or [`CatalogError::NotAStudent`]
    /// for a bad user id, [`CatalogError::BookNotFound`] for a bad book id,
    /// [`CatalogError::AlreadyBorrowed`] if the student already holds this
    /// book, [`CatalogError::BookUnavailable`] when no copy is on the shelf,
    /// and [`CatalogError::BorrowLimitReached`] at the concurrent-loan limit.
    pub fn borrow(&mut self, student_id: &str, book_id: &str) -> CatalogResult<()> {
        let limit = self.config.borrow_limit;

        let user = self
            .users
            .get_mut(student_id)
            .ok_or_else(|| CatalogError::UserNotFound(student_id.to_string()))?;
        let profile = user
            .student_profile_mut()
            .ok_or_else(|| CatalogError::NotAStudent(student_id.to_string()))?;
        let book = self
            .books
            .get_mut(book_id)
            .ok_or_else(|| CatalogError::BookNotFound(book_id.to_string()))?;

        if profile.has_borrowed(book_id) {
            return Err(CatalogError::AlreadyBorrowed {
                user_id: student_id.to_string(),
                book_id: book_id.to_string(),
            });
        }
        if !book.is_available() {
            return Err(CatalogError::BookUnavailable(book.title.clone()));
        }
        if profile.borrowed_count() >= limit {
            return Err(CatalogError::BorrowLimitReached(limit));
        }

        book.take_copy();
        profile.record_checkout(book_id);
        let copies_left = book.copies();

        self.record_event(CatalogEvent::Borrowed {
            user_id: student_id.to_string(),
            book_id: book_id.to_string(),
            copies_left,
        });
        Ok(())
    }

    /// Return a borrowed copy.
    ///
    /// On success the shelf count increments and the book id is dropped from
    /// the student's lending record, in lockstep.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserNotFound`] or [`CatalogError::NotAStudent`]
    /// for a bad user id, [`CatalogError::NotBorrowed`] unless the book is
    /// currently on the student's list, and [`CatalogError::BookNotFound`] if
    /// the book vanished from the registry.
    pub fn return_book(&mut self, student_id: &str, book_id: &str) -> CatalogResult<()> {
        let user = self
            .users
            .get_mut(student_id)
            .ok_or_else(|| CatalogError::UserNotFound(student_id.to_string()))?;
        let profile = user
            .student_profile_mut()
            .ok_or_else(|| CatalogError::NotAStudent(student_id.to_string()))?;

        if !profile.has_borrowed(book_id) {
            return Err(CatalogError::NotBorrowed {
                user_id: student_id.to_string(),
                book_id: book_id.to_string(),
            });
        }

        let book = self
            .books
            .get_mut(book_id)
            .ok_or_else(|| CatalogError::BookNotFound(book_id.to_string()))?;

        book.shelve_copy();
        profile.record_return(book_id);
        let copies_left = book.copies();

        self.record_event(CatalogEvent::Returned {
            user_id: student_id.to_string(),
            book_id: book_id.to_string(),
            copies_left,
        });
        Ok(())
    }

    /// Number of copies currently checked out across all students
    #[must_use]
    pub fn copies_on_loan(&self) -> usize {
        self.users
            .values()
            .filter_map(User::student_profile)
            .map(StudentProfile::borrowed_count)
            .sum()
    }

    /// The recorded event history, oldest first
    #[must_use]
    pub fn history(&self) -> &[EventRecord] {
        &self.history
    }

    /// Append an event to history and fan it out to observers
    fn record_event(&mut self, event: CatalogEvent) {
        self.history.push(EventRecord { event: event.clone(), timestamp: TimeStamp::now() });

        // Maintain history size limit
        if self.history.len() > self.config.max_history {
            self.history.remove(0); // Remove oldest entry
        }

        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Save the full catalog state to a JSON file
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Persistence`] if:
    /// - The state cannot be serialized to JSON
    /// - The file cannot be created
    /// - The data cannot be written to the file
    pub fn save_to_file(&self, path: &Path) -> CatalogResult<()> {
        let snapshot = CatalogSnapshot {
            books: self.books.values().cloned().collect(),
            users: self.users.values().cloned().collect(),
            history: self.history.clone(),
            config: self.config.clone(),
        };

        let serialized = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;

        let mut file = File::create(path)
            .map_err(|e| CatalogError::Persistence(format!("failed to create file: {e}")))?;

        file.write_all(serialized.as_bytes())
            .map_err(|e| CatalogError::Persistence(format!("failed to write to file: {e}")))?;

        Ok(())
    }

    /// Load a catalog from a JSON snapshot file.
    ///
    /// Observers are not serializable, so the standard observers are
    /// re-attached to the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Load`] if:
    /// - The file does not exist or cannot be read
    /// - The JSON parsing fails
    /// - The snapshot violates the lending invariants
    pub fn load_from_file(path: &Path) -> CatalogResult<Self> {
        if !path.exists() {
            return Err(CatalogError::Load(format!("file does not exist: {}", path.display())));
        }

        let mut file = File::open(path)
            .map_err(|e| CatalogError::Load(format!("failed to open file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CatalogError::Load(format!("failed to read file: {e}")))?;

        let snapshot: CatalogSnapshot = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Load(format!("failed to parse JSON: {e}")))?;

        let mut catalog = Self {
            books: snapshot.books.into_iter().map(|book| (book.id.clone(), book)).collect(),
            users: snapshot.users.into_iter().map(|user| (user.id.clone(), user)).collect(),
            history: snapshot.history,
            config: snapshot.config,
            observers: Vec::new(),
        };
        catalog.check_invariants()?;

        // Re-register standard observers
        catalog.register_observer(Box::new(EventLogger));
        catalog.register_observer(Box::new(AvailabilityAlert));

        Ok(catalog)
    }

    /// Verify the lending invariants of a freshly loaded snapshot
    fn check_invariants(&self) -> CatalogResult<()> {
        for user in self.users.values() {
            let Some(profile) = user.student_profile() else {
                continue;
            };

            if profile.borrowed_count() > self.config.borrow_limit {
                return Err(CatalogError::Load(format!(
                    "student {} exceeds the borrow limit",
                    user.id
                )));
            }

            for book_id in profile.borrowed_books() {
                if !self.books.contains_key(book_id) {
                    return Err(CatalogError::Load(format!(
                        "student {} has borrowed unknown book {book_id}",
                        user.id
                    )));
                }
            }
        }
        Ok(())
    }
}

// Include tests module
#[cfg(test)]
mod tests;
