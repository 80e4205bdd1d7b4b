//! Normalized record building blocks shared by every content type

use serde::Serialize;

/// Title used when the CMS provides none
pub const UNTITLED: &str = "Untitled";

/// Resolved media reference (absolute URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub url: String,
    pub alt_text: Option<String>,
}

/// To-one relation to another record (e.g. artwork → collection)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub id: i64,
    pub name: String,
}

/// Common view of a normalized content item
///
/// Records are read-only once normalized; the derivation engine and the
/// presentation layer only ever see them through this trait or by type.
pub trait Record: Clone + Send + Sync + 'static {
    /// Backend-assigned id, stable for the session
    fn id(&self) -> i64;

    fn title(&self) -> &str;

    fn media(&self) -> Option<&Media>;

    /// To-one relation, if the content type has one
    fn relation(&self) -> Option<&Relation> {
        None
    }

    /// Short lines shown under the title on a card
    fn caption(&self) -> Vec<String> {
        Vec::new()
    }

    /// Long free text shown in the detail modal
    fn body(&self) -> Option<&str> {
        None
    }

    /// Detail page link; records without one open the modal instead
    fn link(&self) -> Option<String> {
        None
    }
}
