use serde::{Deserialize, Serialize};

/// Default maximum number of books a student may hold at once
const DEFAULT_BORROW_LIMIT: usize = 5;

/// Default number of event records the catalog retains
const DEFAULT_MAX_HISTORY: usize = 100;

/// Tunable limits for a [`Catalog`](crate::Catalog)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Maximum number of books a student may hold at once
    #[serde(default = "CatalogConfig::default_borrow_limit")]
    pub borrow_limit: usize,
    /// Maximum number of event records kept in history
    #[serde(default = "CatalogConfig::default_max_history")]
    pub max_history: usize,
}

impl CatalogConfig {
    /// Serde default for [`Self::borrow_limit`]
    fn default_borrow_limit() -> usize {
        DEFAULT_BORROW_LIMIT
    }

    /// Serde default for [`Self::max_history`]
    fn default_max_history() -> usize {
        DEFAULT_MAX_HISTORY
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { borrow_limit: DEFAULT_BORROW_LIMIT, max_history: DEFAULT_MAX_HISTORY }
    }
}
