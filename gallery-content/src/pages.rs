//! Page loaders
//!
//! One loader per gallery page. List loaders return [`PageData`] ready for
//! [`ViewStore::apply`](crate::store::ViewStore::apply); detail loaders
//! return the single record or [`ContentError::NotFound`].

use crate::content::{
    normalize_all, About, Artwork, CatalogSchema, Collection, ContactInfo, Course, EventStatus,
    Exhibition, ExhibitionDetail, FromCms, Program, ProgramType,
};
use crate::derive::{CollectionFilter, Unfiltered};
use crate::error::{ContentError, Result};
use crate::fetcher::{ContentClient, ResourceQuery};
use crate::store::{FilterOption, PageData, ViewStore};
use tracing::debug;

/// Exhibition list with current / upcoming / past tabs
pub async fn load_exhibitions(client: &ContentClient) -> Result<PageData<Exhibition, EventStatus>> {
    let query = ResourceQuery::new("exhibitions").populate("image");
    let entries = client.fetch_collection(&query).await?;

    let filters = EventStatus::ALL
        .iter()
        .map(|status| FilterOption::new(*status, status.label()))
        .collect();

    Ok(PageData::new(normalize_all(&entries, client.media_base())).with_filters(filters))
}

/// Store for the exhibition list (opens on the current tab)
pub fn exhibitions_store() -> ViewStore<Exhibition, EventStatus> {
    ViewStore::new().with_filter(EventStatus::Current)
}

/// Exhibition detail by slug, artworks included
pub async fn load_exhibition_detail(client: &ContentClient, slug: &str) -> Result<ExhibitionDetail> {
    let slug = require_slug(slug, "Exhibition")?;
    let query = ResourceQuery::new("collection-exhibitions")
        .filter_eq("slug", slug)
        .populate("artwork_exhibitions.image");

    let entries = client.fetch_collection(&query).await?;
    let raw = entries
        .first()
        .ok_or_else(|| ContentError::NotFound(format!("Exhibition '{}'", slug)))?;

    Ok(ExhibitionDetail::from_cms(raw, client.media_base()))
}

/// Programs with workshop / residency tabs
pub async fn load_programs(client: &ContentClient) -> Result<PageData<Program, ProgramType>> {
    let query = ResourceQuery::new("programs").populate("mediaProgram");
    let entries = client.fetch_collection(&query).await?;

    let filters = vec![
        FilterOption::new(ProgramType::workshop(), ProgramType::WORKSHOP),
        FilterOption::new(ProgramType::residency(), ProgramType::RESIDENCY),
    ];

    Ok(PageData::new(normalize_all(&entries, client.media_base())).with_filters(filters))
}

/// Artworks of a catalog, filterable by collection
///
/// Collections and artworks are fetched concurrently and both must succeed
/// before anything is normalized.
pub async fn load_catalog(
    client: &ContentClient,
    schema: &CatalogSchema,
) -> Result<PageData<Artwork, CollectionFilter>> {
    let (collection_entries, artwork_entries) = client
        .fetch_pair(&schema.collections_query(), &schema.artworks_query())
        .await?;

    let filters = collection_entries
        .iter()
        .map(|raw| Collection::normalize(raw, schema))
        .map(|col| {
            FilterOption::new(CollectionFilter(col.id), col.name).with_description(col.description)
        })
        .collect();

    let artworks = artwork_entries
        .iter()
        .map(|raw| Artwork::normalize(raw, schema, client.media_base()))
        .collect();

    debug!(catalog = schema.artworks_resource, "Catalog normalized");

    Ok(PageData::new(artworks).with_filters(filters))
}

pub async fn load_projects(client: &ContentClient) -> Result<PageData<Artwork, CollectionFilter>> {
    load_catalog(client, &CatalogSchema::PROJECTS).await
}

pub async fn load_archive(client: &ContentClient) -> Result<PageData<Artwork, CollectionFilter>> {
    load_catalog(client, &CatalogSchema::ARCHIVE).await
}

pub async fn load_courses(client: &ContentClient) -> Result<PageData<Course, Unfiltered>> {
    let query = ResourceQuery::new("courses").populate("image");
    let entries = client.fetch_collection(&query).await?;
    Ok(PageData::new(normalize_all(&entries, client.media_base())))
}

/// Course detail by slug
pub async fn load_course_detail(client: &ContentClient, slug: &str) -> Result<Course> {
    let slug = require_slug(slug, "Course")?;
    let query = ResourceQuery::new("courses")
        .filter_eq("slug", slug)
        .populate("image");

    let entries = client.fetch_collection(&query).await?;
    let raw = entries
        .first()
        .ok_or_else(|| ContentError::NotFound(format!("Course '{}'", slug)))?;

    Ok(Course::from_cms(raw, client.media_base()))
}

/// About content (first entry of the collection)
pub async fn load_about(client: &ContentClient) -> Result<About> {
    let query = ResourceQuery::new("abouts").populate("imageAbout");
    let entries = client.fetch_collection(&query).await?;
    let raw = entries
        .first()
        .ok_or_else(|| ContentError::NotFound("About content".to_string()))?;

    Ok(About::from_cms(raw, client.media_base()))
}

/// Static contact page content
pub fn contact_info() -> ContactInfo {
    ContactInfo::default()
}

fn require_slug<'a>(slug: &'a str, kind: &str) -> Result<&'a str> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(ContentError::NotFound(format!("{} with empty slug", kind)));
    }
    Ok(slug)
}
