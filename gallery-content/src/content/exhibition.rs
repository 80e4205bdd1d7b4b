//! Exhibitions and exhibition detail pages

use super::FromCms;
use crate::normalize::{media, record_id, related_list, text, text_or};
use crate::record::{Media, Record, UNTITLED};
use gallery_common::time::format_date_range;
use gallery_common::BaseUrl;
use serde::Serialize;
use serde_json::Value;

const TITLE: &[&str] = &["title"];
const START_DATE: &[&str] = &["startDate", "start"];
const END_DATE: &[&str] = &["endDate", "end"];
const STATUS: &[&str] = &["statusEvent", "status"];
const IMAGE: &[&str] = &["image"];

const SLUG: &[&str] = &["slug"];
const DESCRIPTION: &[&str] = &["description"];
const ARTWORKS: &[&str] = &["artwork_exhibitions"];
const ARTIST: &[&str] = &["artistName", "artist"];

/// Exhibition status tag, also used as the derived bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Current,
    Upcoming,
    Archived,
}

impl EventStatus {
    /// All buckets in tab order
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Current,
        EventStatus::Upcoming,
        EventStatus::Archived,
    ];

    /// Parse a CMS tag (case-insensitive, trimmed); unknown tags yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "current" => Some(EventStatus::Current),
            "upcoming" => Some(EventStatus::Upcoming),
            "archived" | "archive" | "past" => Some(EventStatus::Archived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Current => "current",
            EventStatus::Upcoming => "upcoming",
            EventStatus::Archived => "archived",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Current => "Current Exhibition",
            EventStatus::Upcoming => "Upcoming Exhibition",
            EventStatus::Archived => "Past Exhibition",
        }
    }
}

/// One exhibition listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exhibition {
    pub id: i64,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    /// Explicit status tag; `None` when missing or unrecognised
    pub status: Option<EventStatus>,
    pub media: Option<Media>,
}

impl FromCms for Exhibition {
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, TITLE, UNTITLED),
            start_date: text_or(raw, START_DATE, ""),
            end_date: text_or(raw, END_DATE, ""),
            status: text(raw, STATUS).and_then(|s| EventStatus::parse(&s)),
            media: media(raw, IMAGE, base),
        }
    }
}

impl Record for Exhibition {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn media(&self) -> Option<&Media> {
        self.media.as_ref()
    }

    fn caption(&self) -> Vec<String> {
        let range = format_date_range(&self.start_date, &self.end_date);
        if range.is_empty() {
            Vec::new()
        } else {
            vec![range]
        }
    }
}

/// Artwork shown on an exhibition detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExhibitionArtwork {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub media: Option<Media>,
}

impl FromCms for ExhibitionArtwork {
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, TITLE, UNTITLED),
            artist: text_or(raw, ARTIST, ""),
            description: text_or(raw, DESCRIPTION, ""),
            media: media(raw, IMAGE, base),
        }
    }
}

impl Record for ExhibitionArtwork {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn media(&self) -> Option<&Media> {
        self.media.as_ref()
    }

    fn caption(&self) -> Vec<String> {
        if self.artist.is_empty() {
            Vec::new()
        } else {
            vec![self.artist.clone()]
        }
    }

    fn body(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }
}

/// Exhibition detail (looked up by slug) with its artworks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExhibitionDetail {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub artworks: Vec<ExhibitionArtwork>,
}

impl FromCms for ExhibitionDetail {
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, TITLE, UNTITLED),
            slug: text_or(raw, SLUG, ""),
            description: text_or(raw, DESCRIPTION, ""),
            artworks: related_list(raw, ARTWORKS)
                .into_iter()
                .map(|art| ExhibitionArtwork::from_cms(art, base))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> BaseUrl {
        BaseUrl::parse("https://cms.example.com").unwrap()
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(EventStatus::parse(" Current "), Some(EventStatus::Current));
        assert_eq!(EventStatus::parse("UPCOMING"), Some(EventStatus::Upcoming));
        assert_eq!(EventStatus::parse("archived"), Some(EventStatus::Archived));
        assert_eq!(EventStatus::parse(""), None);
        assert_eq!(EventStatus::parse("draft"), None);
    }

    #[test]
    fn test_flat_exhibition() {
        let raw = json!({
            "id": 1,
            "title": "Earth Works",
            "startDate": "2024-01-01",
            "endDate": "2024-02-01",
            "statusEvent": "Upcoming",
            "image": {"url": "https://res.cloudinary.com/demo/earth.jpg"}
        });
        let ex = Exhibition::from_cms(&raw, &base());
        assert_eq!(ex.id, 1);
        assert_eq!(ex.title, "Earth Works");
        assert_eq!(ex.status, Some(EventStatus::Upcoming));
        assert_eq!(ex.media.unwrap().url, "https://res.cloudinary.com/demo/earth.jpg");
    }

    #[test]
    fn test_exhibition_defaults() {
        let ex = Exhibition::from_cms(&json!({"id": 2}), &base());
        assert_eq!(ex.title, UNTITLED);
        assert_eq!(ex.start_date, "");
        assert_eq!(ex.status, None);
        assert!(ex.media.is_none());
        assert!(ex.caption().is_empty());
    }

    #[test]
    fn test_detail_with_wrapped_artworks() {
        let raw = json!({
            "id": 10,
            "attributes": {
                "title": "Clay",
                "slug": "clay",
                "artwork_exhibitions": {"data": [
                    {"id": 1, "attributes": {"title": "Bowl", "artistName": "Sari",
                        "image": {"data": {"attributes": {"url": "/uploads/bowl.jpg"}}}}},
                    {"id": 2, "attributes": {}}
                ]}
            }
        });
        let detail = ExhibitionDetail::from_cms(&raw, &base());
        assert_eq!(detail.title, "Clay");
        assert_eq!(detail.slug, "clay");
        assert_eq!(detail.artworks.len(), 2);
        assert_eq!(detail.artworks[0].artist, "Sari");
        assert_eq!(
            detail.artworks[0].media.as_ref().unwrap().url,
            "https://cms.example.com/uploads/bowl.jpg"
        );
        assert_eq!(detail.artworks[1].title, UNTITLED);
        assert!(detail.artworks[1].body().is_none());
    }
}
