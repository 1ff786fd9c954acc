//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod notifier;
mod provider;
mod pubsub;

pub use cache::{Cache, CacheError};
pub use notifier::ViewNotifier;
pub use provider::{CallError, CatalogProvider};
pub use pubsub::{PubSub, PubSubError, PubSubMessage};
