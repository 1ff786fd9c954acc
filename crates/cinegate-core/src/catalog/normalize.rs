//! Image reference normalization.

use crate::domain::{CatalogItem, CatalogItemDetails};

/// Prefix turning upstream image paths into fetchable URLs.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Rewrite relative image references into absolute URLs.
///
/// Absent references stay absent. References that are already absolute are
/// left untouched, so normalizing twice equals normalizing once.
pub trait Normalize {
    fn normalize(self) -> Self;
}

fn image_url(path: Option<String>) -> Option<String> {
    path.map(|p| {
        if p.starts_with("http://") || p.starts_with("https://") {
            p
        } else {
            format!("{IMAGE_BASE_URL}{p}")
        }
    })
}

impl Normalize for CatalogItem {
    fn normalize(mut self) -> Self {
        self.poster_path = image_url(self.poster_path.take());
        self.backdrop_path = image_url(self.backdrop_path.take());
        self
    }
}

impl Normalize for CatalogItemDetails {
    fn normalize(mut self) -> Self {
        self.item = self.item.normalize();
        self
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(self) -> Self {
        self.into_iter().map(Normalize::normalize).collect()
    }
}
