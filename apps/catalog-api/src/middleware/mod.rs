//! Middleware modules.

pub mod actor;
pub mod error;
