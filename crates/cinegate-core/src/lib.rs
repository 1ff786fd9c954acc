//! # Cinegate Core
//!
//! The domain layer of the catalog gateway.
//! This crate holds the catalog types, the ports infrastructure must implement,
//! and the cache-aside orchestration over them. It has zero infrastructure dependencies.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod ports;

pub use catalog::CatalogService;
pub use error::{CatalogError, UpstreamError};
