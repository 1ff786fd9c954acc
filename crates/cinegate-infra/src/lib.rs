//! # Cinegate Infrastructure
//!
//! Concrete implementations of the ports defined in `cinegate-core`:
//! cache stores, the event channel, the upstream catalog client and the
//! view notifier.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `redis` - Redis-backed cache and pub/sub

pub mod cache;
pub mod events;
pub mod pubsub;
pub mod upstream;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use events::{ChannelViewNotifier, ViewNotifierConfig};
pub use pubsub::InMemoryPubSub;
pub use upstream::{TmdbClient, TmdbConfig, TmdbConfigError};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
#[cfg(feature = "redis")]
pub use pubsub::RedisPubSub;
