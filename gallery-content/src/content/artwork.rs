//! Artworks and the collections that group them
//!
//! The project catalog and the archive use the same shape under different
//! field names; a [`CatalogSchema`] holds the alias table for each.

use crate::fetcher::ResourceQuery;
use crate::normalize::{media, record_id, relation, text_or};
use crate::record::{Media, Record, Relation, UNTITLED};
use gallery_common::BaseUrl;
use serde::Serialize;
use serde_json::Value;

/// How a catalog asks the CMS to populate artwork relations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateStyle {
    /// `populate[<rel>]=true`
    Fields,
    /// `populate=<rel>`
    List,
}

/// Resources and field aliases for one artwork catalog
#[derive(Debug, Clone, Copy)]
pub struct CatalogSchema {
    pub collections_resource: &'static str,
    pub artworks_resource: &'static str,
    pub populate_style: PopulateStyle,
    pub collection_name: &'static [&'static str],
    pub collection_description: &'static [&'static str],
    pub title: &'static [&'static str],
    pub artist: &'static [&'static str],
    pub description: &'static [&'static str],
    pub image: &'static [&'static str],
    pub relation: &'static [&'static str],
}

impl CatalogSchema {
    /// Current projects (`collections` + `artworks`)
    pub const PROJECTS: CatalogSchema = CatalogSchema {
        collections_resource: "collections",
        artworks_resource: "artworks",
        populate_style: PopulateStyle::Fields,
        collection_name: &["name"],
        collection_description: &["collapDescription", "description"],
        title: &["title"],
        artist: &["artist", "Artist"],
        description: &["description", "Description", "deskripsi"],
        image: &["imageArtwork"],
        relation: &["collection"],
    };

    /// Archive (`collection-archives` + `artwork-archives`)
    pub const ARCHIVE: CatalogSchema = CatalogSchema {
        collections_resource: "collection-archives",
        artworks_resource: "artwork-archives",
        populate_style: PopulateStyle::List,
        collection_name: &["nameArchive", "name"],
        collection_description: &["descriptionArchive", "collapDescription"],
        title: &["titleArchive", "title"],
        artist: &["artistArchive", "artist"],
        description: &["descriptionArchive", "description"],
        image: &["imageArchive"],
        relation: &["collection_archive"],
    };

    pub fn collections_query(&self) -> ResourceQuery {
        ResourceQuery::new(self.collections_resource)
    }

    /// Artwork query with the image and collection relations populated
    pub fn artworks_query(&self) -> ResourceQuery {
        let query = ResourceQuery::new(self.artworks_resource);
        let (image, rel) = (self.image[0], self.relation[0]);
        match self.populate_style {
            PopulateStyle::Fields => query.populate_field(image).populate_field(rel),
            PopulateStyle::List => query.populate(image).populate(rel),
        }
    }
}

/// Collection (filter facet for artworks)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Collection {
    pub fn normalize(raw: &Value, schema: &CatalogSchema) -> Self {
        Self {
            id: record_id(raw),
            name: text_or(raw, schema.collection_name, UNTITLED),
            description: text_or(raw, schema.collection_description, ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artwork {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub media: Option<Media>,
    pub collection: Option<Relation>,
}

impl Artwork {
    pub fn normalize(raw: &Value, schema: &CatalogSchema, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, schema.title, UNTITLED),
            artist: text_or(raw, schema.artist, "Unknown"),
            description: text_or(raw, schema.description, ""),
            media: media(raw, schema.image, base),
            collection: relation(raw, schema.relation, schema.collection_name),
        }
    }
}

impl Record for Artwork {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn media(&self) -> Option<&Media> {
        self.media.as_ref()
    }

    fn relation(&self) -> Option<&Relation> {
        self.collection.as_ref()
    }

    fn caption(&self) -> Vec<String> {
        vec![self.artist.clone()]
    }

    fn body(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }
}
