//! Request types for the catalog read endpoints.

use serde::{Deserialize, Serialize};

/// `?language=` accepted by every read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

/// `?query=&language=` for search.
///
/// `query` is optional on the wire so a missing value is reported like a
/// blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub language: Option<String>,
}
