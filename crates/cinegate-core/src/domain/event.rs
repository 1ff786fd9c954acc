use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the user a read is performed for.
pub type ActorId = u64;

/// "Viewed" notification emitted after a successful details read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    pub actor_id: ActorId,
    pub item_id: u64,
    pub timestamp: DateTime<Utc>,
    pub language: String,
}

impl ViewEvent {
    /// Create an event stamped with the current time.
    pub fn new(actor_id: ActorId, item_id: u64, language: impl Into<String>) -> Self {
        Self {
            actor_id,
            item_id,
            timestamp: Utc::now(),
            language: language.into(),
        }
    }
}
