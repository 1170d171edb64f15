use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{book::Book, config::CatalogConfig, events::EventRecord, user::User};

/// A serializable wall-clock timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeStamp {
    /// Seconds since Unix epoch
    pub seconds: u64,
    /// Nanoseconds part
    pub nanos: u32,
}

impl TimeStamp {
    /// Create a new timestamp from the current system time.
    ///
    /// A system clock before the Unix epoch yields the zero timestamp.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now().duration_since(UNIX_EPOCH).map_or_else(
            |_| Self::default(),
            |duration| Self { seconds: duration.as_secs(), nanos: duration.subsec_nanos() },
        )
    }
}

/// Serializable representation of the full catalog state
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct CatalogSnapshot {
    /// All registered books
    pub(crate) books: Vec<Book>,
    /// All registered users
    pub(crate) users: Vec<User>,
    /// Recorded event history
    pub(crate) history: Vec<EventRecord>,
    /// Limits the catalog was running with
    pub(crate) config: CatalogConfig,
}
