//! gallery-content: Hamur Artspace gallery content layer
//!
//! Fetches exhibitions, programs, projects, archive items, courses and the
//! about page from a Strapi-style headless CMS, normalizes the loosely shaped
//! responses into typed records, derives filtered views and renders them as
//! HTML fragments.
//!
//! ```text
//! ContentClient -> normalize -> PageData -> ViewStore -> derive_view -> presentation
//! ```

pub mod content;
pub mod derive;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod pages;
pub mod presentation;
pub mod record;
pub mod store;

pub use derive::{derive_view, CollectionFilter, Unfiltered, ViewFilter};
pub use error::{ContentError, Result};
pub use fetcher::{ContentClient, ResourceQuery};
pub use record::{Media, Record, Relation};
pub use store::{FilterOption, ModalTarget, Page, PageData, ViewState, ViewStore};
