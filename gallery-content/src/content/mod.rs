//! Content types and their CMS field alias tables

pub mod about;
pub mod artwork;
pub mod contact;
pub mod course;
pub mod exhibition;
pub mod program;

pub use about::About;
pub use artwork::{Artwork, CatalogSchema, Collection};
pub use contact::ContactInfo;
pub use course::Course;
pub use exhibition::{EventStatus, Exhibition, ExhibitionArtwork, ExhibitionDetail};
pub use program::{Program, ProgramType};

use gallery_common::BaseUrl;
use serde_json::Value;

/// Content types that normalize from a single raw CMS entry
pub trait FromCms: Sized {
    /// Build the record; never fails, missing fields take defaults
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self;
}

/// Normalize every entry of a response, preserving order
pub fn normalize_all<T: FromCms>(entries: &[Value], base: &BaseUrl) -> Vec<T> {
    entries.iter().map(|raw| T::from_cms(raw, base)).collect()
}
