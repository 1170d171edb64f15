use crate::{
    catalog::Catalog,
    error::{CatalogError, CatalogResult},
};

/// Read-only textual views over a catalog
#[derive(Debug)]
pub struct CatalogReport;

impl CatalogReport {
    /// Generate a markdown table of every book in the registry
    #[must_use]
    pub fn book_table(catalog: &Catalog) -> String {
        let mut books = catalog.books().peekable();
        if books.peek().is_none() {
            return "No books in the library".to_string();
        }

        let mut table = String::from("| Id | Title | Author | Available | Copies |\n");
        table.push_str("|----|-------|--------|-----------|--------|\n");

        for book in books {
            table.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                book.id,
                book.title,
                book.author,
                book.is_available(),
                book.copies()
            ));
        }

        table
    }

    /// Generate a listing of the books a student currently holds
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UserNotFound`] for an unknown id and
    /// [`CatalogError::NotAStudent`] when the user is a librarian.
    pub fn borrowed_books(catalog: &Catalog, student_id: &str) -> CatalogResult<String> {
        let user = catalog.user(student_id)?;
        let profile = user
            .student_profile()
            .ok_or_else(|| CatalogError::NotAStudent(student_id.to_string()))?;

        if profile.borrowed_books().is_empty() {
            return Ok(format!("No books borrowed by {}", user.name));
        }

        let mut listing = format!("Books borrowed by {}:\n", user.name);
        for book_id in profile.borrowed_books() {
            match catalog.book(book_id) {
                Some(book) => listing.push_str(&format!("  {book}\n")),
                None => listing.push_str(&format!("  {book_id} (missing from registry)\n")),
            }
        }

        Ok(listing)
    }

    /// Generate a numbered listing of the recorded event history
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn history(catalog: &Catalog) -> String {
        if catalog.history().is_empty() {
            return "No catalog activity recorded yet.".to_string();
        }

        let mut listing = String::from("Catalog activity:\n");
        for (i, record) in catalog.history().iter().enumerate() {
            listing.push_str(&format!("{}. {:?}\n", i + 1, record.event));
        }

        listing
    }

    /// Generate a summary of catalog counts
    #[must_use]
    pub fn stats(catalog: &Catalog) -> String {
        let mut summary = String::from("Catalog statistics:\n");
        summary.push_str(&format!("  Books: {}\n", catalog.books().count()));
        summary.push_str(&format!("  Users: {}\n", catalog.users().count()));
        summary.push_str(&format!("  Copies on loan: {}\n", catalog.copies_on_loan()));
        summary.push_str(&format!("  History entries: {}\n", catalog.history().len()));
        summary
    }
}
