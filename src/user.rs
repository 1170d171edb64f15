use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered library user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact email address
    pub email: String,
    /// What the user is allowed to do in the catalog
    pub role: Role,
}

/// The two user categories the catalog distinguishes.
///
/// The lending record lives inside the `Student` variant, so a librarian
/// having no borrowed list is a type-level fact rather than a convention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Role {
    /// A borrowing patron together with their lending record
    Student(StudentProfile),
    /// Library staff managing the book registry
    Librarian,
}

/// Lending state attached to a student
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentProfile {
    /// Department the student belongs to
    pub department: String,
    /// Ids of the books currently borrowed, in checkout order
    borrowed: Vec<String>,
}

impl StudentProfile {
    /// Create an empty lending record for a department
    #[must_use]
    pub fn new(department: &str) -> Self {
        Self { department: department.to_string(), borrowed: Vec::new() }
    }

    /// Ids of the books currently borrowed, in checkout order
    #[must_use]
    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed
    }

    /// Number of books currently borrowed
    #[must_use]
    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Whether the given book is currently on this student's list
    #[must_use]
    pub fn has_borrowed(&self, book_id: &str) -> bool {
        self.borrowed.iter().any(|id| id == book_id)
    }

    /// Append a checkout of the given book to the lending record
    pub(crate) fn record_checkout(&mut self, book_id: &str) {
        self.borrowed.push(book_id.to_string());
    }

    /// Drop the given book from the lending record
    pub(crate) fn record_return(&mut self, book_id: &str) {
        self.borrowed.retain(|id| id != book_id);
    }
}

impl User {
    /// Registration data for a student in the given department
    #[must_use]
    pub fn student(id: &str, name: &str, email: &str, department: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Student(StudentProfile::new(department)),
        }
    }

    /// Registration data for a librarian
    #[must_use]
    pub fn librarian(id: &str, name: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Librarian,
        }
    }

    /// The lending record, if this user is a student
    #[must_use]
    pub fn student_profile(&self) -> Option<&StudentProfile> {
        match &self.role {
            Role::Student(profile) => Some(profile),
            Role::Librarian => None,
        }
    }

    /// Mutable access to the lending record, if this user is a student
    pub(crate) fn student_profile_mut(&mut self) -> Option<&mut StudentProfile> {
        match &mut self.role {
            Role::Student(profile) => Some(profile),
            Role::Librarian => None,
        }
    }

    /// One-line description of the user's role
    #[must_use]
    pub fn role_description(&self) -> String {
        match &self.role {
            Role::Student(profile) => {
                format!("Student: {} from {}", self.name, profile.department)
            }
            Role::Librarian => format!("Librarian: {}", self.name),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User ID: {}, Name: {}, Email: {}", self.id, self.name, self.email)
    }
}
