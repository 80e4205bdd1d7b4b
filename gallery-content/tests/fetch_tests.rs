//! Fetcher integration tests against a mock CMS
//!
//! Covers:
//! - Cache-bypass headers on every request
//! - Query parameter encoding (populate, populate[x], filters[f][$eq])
//! - Error mapping: non-success status, unreachable host, invalid JSON
//! - Paired fetches fail when either side fails

mod helpers;

use gallery_common::{BaseUrl, CmsConfig};
use gallery_content::content::CatalogSchema;
use gallery_content::pages::{load_archive, load_course_detail, load_projects};
use gallery_content::{ContentClient, ContentError, ResourceQuery};
use helpers::{closed_base_url, MockCms, MockResponse};
use serde_json::json;

#[tokio::test]
async fn test_requests_bypass_caches() {
    let cms = MockCms::start().await;
    cms.respond("abouts", MockResponse::json(json!({"data": []})));

    let entries = cms
        .client()
        .fetch_collection(&ResourceQuery::new("abouts").populate("imageAbout"))
        .await
        .unwrap();
    assert!(entries.is_empty());

    let requests = cms.requests_for("abouts");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].cache_control.as_deref(), Some("no-cache, no-store"));
    assert_eq!(requests[0].pragma.as_deref(), Some("no-cache"));
    assert_eq!(
        requests[0].params,
        vec![("populate".to_string(), "imageAbout".to_string())]
    );
}

#[tokio::test]
async fn test_slug_filter_is_sent_to_server() {
    let cms = MockCms::start().await;
    cms.respond(
        "courses",
        MockResponse::json(json!({"data": [{"id": 3, "attributes": {"tittle": "Clay", "slug": "clay"}}]})),
    );

    let course = load_course_detail(&cms.client(), " clay ").await.unwrap();
    assert_eq!(course.title, "Clay");

    let params = &cms.requests_for("courses")[0].params;
    assert!(params.contains(&("filters[slug][$eq]".to_string(), "clay".to_string())));
    assert!(params.contains(&("populate".to_string(), "image".to_string())));
}

#[tokio::test]
async fn test_catalog_populate_styles() {
    let cms = MockCms::start().await;
    for collection in ["collections", "artworks", "collection-archives", "artwork-archives"] {
        cms.respond(collection, MockResponse::json(json!({"data": []})));
    }

    load_projects(&cms.client()).await.unwrap();
    load_archive(&cms.client()).await.unwrap();

    let artworks = &cms.requests_for("artworks")[0].params;
    assert!(artworks.contains(&("populate[imageArtwork]".to_string(), "true".to_string())));
    assert!(artworks.contains(&("populate[collection]".to_string(), "true".to_string())));

    let archive = &cms.requests_for("artwork-archives")[0].params;
    assert!(archive.contains(&("populate".to_string(), "imageArchive".to_string())));
    assert!(archive.contains(&("populate".to_string(), "collection_archive".to_string())));

    assert_eq!(
        CatalogSchema::ARCHIVE.collections_query().path(),
        "api/collection-archives"
    );
}

#[tokio::test]
async fn test_error_status_carries_status_and_body() {
    let cms = MockCms::start().await;
    cms.respond("programs", MockResponse::status(503, "maintenance"));

    let err = cms
        .client()
        .fetch_collection(&ResourceQuery::new("programs"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "Programs 503: maintenance");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let base = BaseUrl::parse(&closed_base_url().await).unwrap();
    let client = ContentClient::new(&CmsConfig::with_base_url(base)).unwrap();

    let err = client
        .fetch_collection(&ResourceQuery::new("courses"))
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let cms = MockCms::start().await;
    cms.respond("courses", MockResponse::status(200, "<html>not json</html>"));

    let err = cms
        .client()
        .fetch_collection(&ResourceQuery::new("courses"))
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_catalog_fails_when_either_fetch_fails() {
    let cms = MockCms::start().await;
    cms.respond("collections", MockResponse::json(json!({"data": [{"id": 1, "name": "A"}]})));
    cms.respond("artworks", MockResponse::status(500, "boom"));

    let err = load_projects(&cms.client()).await.unwrap_err();
    assert_eq!(err.to_string(), "Artworks 500: boom");

    cms.respond("collections", MockResponse::status(404, "gone"));
    cms.respond("artworks", MockResponse::json(json!({"data": []})));
    let err = load_projects(&cms.client()).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_empty_slug_never_reaches_server() {
    let cms = MockCms::start().await;
    let err = load_course_detail(&cms.client(), "  ").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(cms.requests().is_empty());
}
