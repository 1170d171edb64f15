use std::{env, fs, path::PathBuf};

use crate::{
    book::Book,
    catalog::Catalog,
    config::CatalogConfig,
    error::CatalogError,
    events::CatalogEvent,
    user::User,
};

/// Helper to build a catalog with a librarian, two students and three books
fn setup_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    drop(catalog.register_user(User::librarian("lib001", "John Doe", "john@library.com")));
    drop(catalog.register_user(User::student(
        "stu001",
        "Alice Smith",
        "alice@uni.edu",
        "Computer Science",
    )));
    drop(catalog.register_user(User::student(
        "stu002",
        "Bob Johnson",
        "bob@uni.edu",
        "Mathematics",
    )));

    drop(catalog.add_book(Book::new("B001", "Java Programming", "James Gosling", 5)));
    drop(catalog.add_book(Book::new("B002", "Effective Java", "Joshua Bloch", 3)));
    drop(catalog.add_book(Book::new("B003", "Clean Code", "Robert Martin", 2)));

    catalog
}

/// Helper for a unique scratch file under the system temp directory
fn scratch_file(name: &str) -> PathBuf {
    env::temp_dir().join(format!("library-catalog-{name}.json"))
}

#[test]
fn test_add_book_registers_title() {
    let catalog = setup_catalog();

    let book = catalog.book("B001");
    assert!(matches!(book, Some(found) if found.title == "Java Programming"));
    assert!(matches!(book, Some(found) if found.is_available()));
}

#[test]
fn test_add_duplicate_book_fails() {
    let mut catalog = setup_catalog();

    let result = catalog.add_book(Book::new("B001", "Another Title", "Another Author", 1));
    assert!(matches!(result, Err(CatalogError::BookExists(_))));
}

#[test]
fn test_remove_book() {
    let mut catalog = setup_catalog();

    let result = catalog.remove_book("B003");
    assert!(result.is_ok());
    assert!(catalog.book("B003").is_none());
}

#[test]
fn test_remove_missing_book_fails() {
    let mut catalog = setup_catalog();

    let result = catalog.remove_book("B999");
    assert!(matches!(result, Err(CatalogError::BookNotFound(_))));
}

#[test]
fn test_remove_borrowed_book_fails() {
    let mut catalog = setup_catalog();
    drop(catalog.borrow("stu001", "B003"));

    let result = catalog.remove_book("B003");
    assert!(matches!(result, Err(CatalogError::BookOnLoan(_))));

    // Removal succeeds again once the copy is back on the shelf
    drop(catalog.return_book("stu001", "B003"));
    assert!(catalog.remove_book("B003").is_ok());
}

#[test]
fn test_register_duplicate_user_fails() {
    let mut catalog = setup_catalog();

    let result = catalog.register_user(User::student("stu001", "Eve", "eve@uni.edu", "Physics"));
    assert!(matches!(result, Err(CatalogError::UserExists(_))));
}

#[test]
fn test_search_exact_id_wins_over_fuzzy_match() {
    let mut catalog = Catalog::new();
    drop(catalog.add_book(Book::new("Clean Code", "Refactoring Notes", "Anonymous", 1)));
    drop(catalog.add_book(Book::new("B010", "Clean Code", "Robert Martin", 2)));

    let found = catalog.search_book("Clean Code");
    assert!(matches!(found, Ok(book) if book.id == "Clean Code"));
}

#[test]
fn test_search_title_is_case_insensitive() {
    let catalog = setup_catalog();

    let found = catalog.search_book("clean code");
    assert!(matches!(found, Ok(book) if book.id == "B003"));
}

#[test]
fn test_search_author_is_case_insensitive() {
    let catalog = setup_catalog();

    let found = catalog.search_book("JOSHUA BLOCH");
    assert!(matches!(found, Ok(book) if book.id == "B002"));
}

#[test]
fn test_search_ambiguous_returns_first_in_id_order() {
    let mut catalog = setup_catalog();
    drop(catalog.add_book(Book::new("B004", "Java Concurrency", "Joshua Bloch", 1)));

    let found = catalog.search_book("Joshua Bloch");
    assert!(matches!(found, Ok(book) if book.id == "B002"));
}

#[test]
fn test_search_no_match_fails() {
    let catalog = setup_catalog();

    let result = catalog.search_book("Non-existent Book");
    assert!(matches!(result, Err(CatalogError::BookNotFound(_))));
}

#[test]
fn test_borrow_decrements_copies_and_records_loan() {
    let mut catalog = setup_catalog();

    let result = catalog.borrow("stu001", "B001");
    assert!(result.is_ok());
    assert_eq!(catalog.book("B001").map(Book::copies), Some(4));

    let user = catalog.user("stu001");
    assert!(matches!(
        user,
        Ok(found) if found.student_profile().is_some_and(|profile| profile.has_borrowed("B001"))
    ));
}

#[test]
fn test_return_round_trip_restores_copy_count() {
    let mut catalog = setup_catalog();

    drop(catalog.borrow("stu001", "B002"));
    assert_eq!(catalog.book("B002").map(Book::copies), Some(2));

    let result = catalog.return_book("stu001", "B002");
    assert!(result.is_ok());
    assert_eq!(catalog.book("B002").map(Book::copies), Some(3));

    let user = catalog.user("stu001");
    assert!(matches!(
        user,
        Ok(found) if found.student_profile().is_some_and(|profile| !profile.has_borrowed("B002"))
    ));
}

#[test]
fn test_borrow_unavailable_book_fails() {
    let mut catalog = setup_catalog();
    drop(catalog.add_book(Book::new("B005", "Rare Volume", "Unknown", 1)));

    drop(catalog.borrow("stu001", "B005"));
    let result = catalog.borrow("stu002", "B005");
    assert!(matches!(result, Err(CatalogError::BookUnavailable(title)) if title == "Rare Volume"));
}

#[test]
fn test_borrow_same_book_twice_fails() {
    let mut catalog = setup_catalog();

    drop(catalog.borrow("stu001", "B001"));
    let result = catalog.borrow("stu001", "B001");
    assert!(matches!(result, Err(CatalogError::AlreadyBorrowed { .. })));

    // The failed attempt must not touch the shelf count
    assert_eq!(catalog.book("B001").map(Book::copies), Some(4));
}

#[test]
fn test_borrow_limit_is_enforced() {
    let mut catalog = setup_catalog();
    for n in ["L1", "L2", "L3", "L4", "L5", "L6"] {
        drop(catalog.add_book(Book::new(n, n, "Various", 1)));
    }

    for n in ["L1", "L2", "L3", "L4", "L5"] {
        assert!(catalog.borrow("stu001", n).is_ok());
    }

    let result = catalog.borrow("stu001", "L6");
    assert!(matches!(result, Err(CatalogError::BorrowLimitReached(5))));
}

#[test]
fn test_configured_borrow_limit_overrides_default() {
    let mut catalog = Catalog::with_config(CatalogConfig { borrow_limit: 1, max_history: 100 });
    drop(catalog.register_user(User::student("stu001", "Alice Smith", "alice@uni.edu", "CS")));
    drop(catalog.add_book(Book::new("B001", "Java Programming", "James Gosling", 5)));
    drop(catalog.add_book(Book::new("B002", "Effective Java", "Joshua Bloch", 3)));

    assert!(catalog.borrow("stu001", "B001").is_ok());
    let result = catalog.borrow("stu001", "B002");
    assert!(matches!(result, Err(CatalogError::BorrowLimitReached(1))));
}

#[test]
fn test_return_without_loan_fails() {
    let mut catalog = setup_catalog();

    let result = catalog.return_book("stu001", "B001");
    assert!(matches!(result, Err(CatalogError::NotBorrowed { .. })));
}

#[test]
fn test_librarian_cannot_borrow() {
    let mut catalog = setup_catalog();

    let result = catalog.borrow("lib001", "B001");
    assert!(matches!(result, Err(CatalogError::NotAStudent(_))));

    let desk = catalog.as_student("lib001");
    assert!(matches!(desk, Err(CatalogError::NotAStudent(_))));
}

#[test]
fn test_student_cannot_manage_registry() {
    let mut catalog = setup_catalog();

    let desk = catalog.as_librarian("stu001");
    assert!(matches!(desk, Err(CatalogError::NotALibrarian(_))));
}

#[test]
fn test_unknown_user_and_book_fail() {
    let mut catalog = setup_catalog();

    assert!(matches!(catalog.borrow("ghost", "B001"), Err(CatalogError::UserNotFound(_))));
    assert!(matches!(catalog.borrow("stu001", "B999"), Err(CatalogError::BookNotFound(_))));
}

#[test]
fn test_role_wrappers_run_the_lending_workflow() {
    let mut catalog = setup_catalog();

    let mut desk = catalog.as_librarian("lib001");
    assert!(matches!(
        desk.as_mut().map(|d| d.add_book(Book::new("B006", "The Rust Book", "Klabnik", 1))),
        Ok(Ok(()))
    ));

    let mut alice = catalog.as_student("stu001");
    assert!(matches!(alice.as_mut().map(|a| a.borrow("B006")), Ok(Ok(()))));
    assert!(matches!(&alice, Ok(a) if a.borrowed_books() == vec!["B006".to_string()]));
    assert!(matches!(alice.as_mut().map(|a| a.return_book("B006")), Ok(Ok(()))));
}

#[test]
fn test_history_records_events_in_order() {
    let mut catalog = setup_catalog();
    drop(catalog.borrow("stu001", "B001"));

    // Three users, three books, one loan
    assert_eq!(catalog.history().len(), 7);
    let last = catalog.history().last();
    assert!(matches!(
        last,
        Some(record) if record.event
            == CatalogEvent::Borrowed {
                user_id: "stu001".to_string(),
                book_id: "B001".to_string(),
                copies_left: 4,
            }
    ));
}

#[test]
fn test_history_is_bounded() {
    let mut catalog = Catalog::with_config(CatalogConfig { borrow_limit: 5, max_history: 3 });
    drop(catalog.register_user(User::student("stu001", "Alice Smith", "alice@uni.edu", "CS")));
    drop(catalog.add_book(Book::new("B001", "Java Programming", "James Gosling", 5)));
    drop(catalog.add_book(Book::new("B002", "Effective Java", "Joshua Bloch", 3)));
    drop(catalog.add_book(Book::new("B003", "Clean Code", "Robert Martin", 2)));

    assert_eq!(catalog.history().len(), 3);

    // The oldest entry (the user registration) has been dropped
    let first = catalog.history().first();
    assert!(matches!(first, Some(record) if matches!(record.event, CatalogEvent::BookAdded { .. })));
}

#[test]
#[allow(clippy::expect_used)]
fn test_save_and_load_round_trip() {
    let path = scratch_file("roundtrip");
    let mut catalog = setup_catalog();
    drop(catalog.borrow("stu001", "B001"));
    drop(catalog.borrow("stu001", "B002"));

    catalog.save_to_file(&path).expect("save should succeed");
    let restored = Catalog::load_from_file(&path).expect("load should succeed");
    drop(fs::remove_file(&path));

    assert_eq!(restored.book("B001").map(Book::copies), Some(4));
    assert_eq!(restored.book("B002").map(Book::copies), Some(2));
    assert_eq!(restored.history(), catalog.history());

    let user = restored.user("stu001");
    assert!(matches!(
        user,
        Ok(found) if found.student_profile().is_some_and(|profile| profile.has_borrowed("B002"))
    ));
}

#[test]
fn test_loaded_catalog_keeps_operating() {
    let path = scratch_file("reload-borrow");
    let mut catalog = setup_catalog();
    drop(catalog.borrow("stu001", "B001"));

    assert!(catalog.save_to_file(&path).is_ok());
    let restored = Catalog::load_from_file(&path);
    drop(fs::remove_file(&path));

    assert!(matches!(
        restored.map(|mut loaded| loaded.borrow("stu002", "B003")),
        Ok(Ok(()))
    ));
}

#[test]
fn test_load_missing_file_fails() {
    let path = scratch_file("never-created");

    let result = Catalog::load_from_file(&path);
    assert!(matches!(result, Err(CatalogError::Load(_))));
}

#[test]
#[allow(clippy::expect_used)]
fn test_load_rejects_dangling_borrowed_id() {
    let path = scratch_file("dangling-loan");
    let snapshot = r#"{
        "books": [],
        "users": [
            {
                "id": "stu001",
                "name": "Alice Smith",
                "email": "alice@uni.edu",
                "role": { "Student": { "department": "CS", "borrowed": ["GHOST"] } }
            }
        ],
        "history": [],
        "config": { "borrow_limit": 5, "max_history": 100 }
    }"#;
    fs::write(&path, snapshot).expect("scratch file should be writable");

    let result = Catalog::load_from_file(&path);
    drop(fs::remove_file(&path));

    assert!(matches!(result, Err(CatalogError::Load(_))));
}

#[test]
#[allow(clippy::expect_used)]
fn test_load_rejects_over_limit_lending_record() {
    let path = scratch_file("over-limit");
    let snapshot = r#"{
        "books": [
            { "id": "B001", "title": "A", "author": "X", "copies": 1 },
            { "id": "B002", "title": "B", "author": "X", "copies": 1 }
        ],
        "users": [
            {
                "id": "stu001",
                "name": "Alice Smith",
                "email": "alice@uni.edu",
                "role": { "Student": { "department": "CS", "borrowed": ["B001", "B002"] } }
            }
        ],
        "history": [],
        "config": { "borrow_limit": 1, "max_history": 100 }
    }"#;
    fs::write(&path, snapshot).expect("scratch file should be writable");

    let result = Catalog::load_from_file(&path);
    drop(fs::remove_file(&path));

    assert!(matches!(result, Err(CatalogError::Load(_))));
}
