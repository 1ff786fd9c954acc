//! Catalog gateway logic: key layout, TTL policy, normalization,
//! failure classification and the cache-aside service tying them together.

mod classify;
mod key;
mod normalize;
mod service;

pub use classify::classify;
pub use key::{CacheKey, ResourceKind};
pub use normalize::{IMAGE_BASE_URL, Normalize};
pub use service::{CatalogService, DEFAULT_LANGUAGE};
