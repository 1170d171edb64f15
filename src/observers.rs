use crate::events::CatalogEvent;

/// Trait for catalog event observation
pub trait CatalogObserver {
    /// Called after every successful catalog mutation
    fn on_event(&self, event: &CatalogEvent);
}

/// Logs every catalog event that occurs in the system
#[derive(Debug)]
pub struct EventLogger;

impl CatalogObserver for EventLogger {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::BookAdded { book_id } => {
                tracing::info!(%book_id, "book added");
            }
            CatalogEvent::BookRemoved { book_id } => {
                tracing::info!(%book_id, "book removed");
            }
            CatalogEvent::UserRegistered { user_id } => {
                tracing::info!(%user_id, "user registered");
            }
            CatalogEvent::Borrowed { user_id, book_id, copies_left } => {
                tracing::info!(%user_id, %book_id, copies_left, "book borrowed");
            }
            CatalogEvent::Returned { user_id, book_id, copies_left } => {
                tracing::info!(%user_id, %book_id, copies_left, "book returned");
            }
        }
    }
}

/// Raises alerts when a title crosses an availability edge
#[derive(Debug)]
pub struct AvailabilityAlert;

impl CatalogObserver for AvailabilityAlert {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::Borrowed { book_id, copies_left: 0, .. } => {
                tracing::warn!(%book_id, "last copy checked out");
            }
            CatalogEvent::Returned { book_id, copies_left: 1, .. } => {
                tracing::info!(%book_id, "book is available again");
            }
            _ => {}
        }
    }
}
