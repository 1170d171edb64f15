use std::path::Path;

use library_catalog::{
    Book, Catalog, CatalogReport, CatalogResult, User,
    observers::{AvailabilityAlert, EventLogger},
};

/// Replay the full lending workflow against a fresh catalog
fn main() -> CatalogResult<()> {
    tracing_subscriber::fmt::try_init().ok();

    let mut catalog = Catalog::new();
    catalog.register_observer(Box::new(EventLogger));
    catalog.register_observer(Box::new(AvailabilityAlert));

    catalog.register_user(User::librarian("lib001", "John Doe", "john@library.com"))?;
    catalog.register_user(User::student(
        "stu001",
        "Alice Smith",
        "alice@uni.edu",
        "Computer Science",
    ))?;
    catalog.register_user(User::student("stu002", "Bob Johnson", "bob@uni.edu", "Mathematics"))?;

    for user in catalog.users() {
        println!("{}", user.role_description());
    }

    {
        let mut desk = catalog.as_librarian("lib001")?;
        desk.add_book(Book::new("B001", "Java Programming", "James Gosling", 5))?;
        desk.add_book(Book::new("B002", "Effective Java", "Joshua Bloch", 3))?;
        desk.add_book(Book::new("B003", "Clean Code", "Robert Martin", 2))?;
    }

    println!("\n{}", CatalogReport::book_table(&catalog));

    println!("\nStudent activities:");
    let mut alice = catalog.as_student("stu001")?;
    alice.borrow("B001")?;
    alice.borrow("B002")?;

    // Borrowing the same title twice is rejected
    if let Err(error) = alice.borrow("B001") {
        println!("Error: {error}");
    }

    println!("\n{}", CatalogReport::borrowed_books(&catalog, "stu001")?);

    catalog.as_student("stu001")?.return_book("B001")?;
    println!("{}", CatalogReport::borrowed_books(&catalog, "stu001")?);

    println!("\nSearch results:");
    match catalog.search_book("Clean Code") {
        Ok(book) => println!("Found: {book}"),
        Err(error) => println!("Error: {error}"),
    }
    if let Err(error) = catalog.search_book("Non-existent Book") {
        println!("Error: {error}");
    }

    let data_file = Path::new("library-catalog.json");
    catalog.save_to_file(data_file)?;

    println!("\n--- Simulating application restart ---\n");

    let mut restored = Catalog::load_from_file(data_file)?;
    restored.as_student("stu002")?.borrow("B003")?;

    println!("{}", CatalogReport::history(&restored));
    println!("{}", CatalogReport::stats(&restored));

    Ok(())
}
