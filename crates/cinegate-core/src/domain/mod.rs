//! Domain entities - the catalog objects the gateway serves.

mod event;
mod item;

pub use event::{ActorId, ViewEvent};
pub use item::{CatalogItem, CatalogItemDetails, CatalogPage, Genre};
