//! Upstream catalog API client.

mod tmdb;

pub use tmdb::{TmdbClient, TmdbConfig, TmdbConfigError};
