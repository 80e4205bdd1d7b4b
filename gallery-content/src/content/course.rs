//! Courses

use super::FromCms;
use crate::normalize::{media, record_id, text, text_or};
use crate::record::{Media, Record, UNTITLED};
use gallery_common::BaseUrl;
use serde::Serialize;
use serde_json::Value;

// `tittle` is the field name the CMS model was created with
const TITLE: &[&str] = &["tittle", "title"];
const SLUG: &[&str] = &["slug"];
const SCHEDULE: &[&str] = &["schedule"];
const DESCRIPTION: &[&str] = &["description"];
const REGISTRATION_LINK: &[&str] = &["registrationLink"];
const IMAGE: &[&str] = &["image"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// Free-form schedule, leading token is the start date (`2024-01-01 10:00`)
    pub schedule: String,
    pub description: String,
    pub registration_link: Option<String>,
    pub media: Option<Media>,
}

impl Course {
    /// Relative link to the course detail page
    pub fn detail_path(&self) -> String {
        format!("/courses/{}", self.slug)
    }
}

impl FromCms for Course {
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, TITLE, UNTITLED),
            slug: text_or(raw, SLUG, ""),
            schedule: text_or(raw, SCHEDULE, ""),
            description: text_or(raw, DESCRIPTION, ""),
            registration_link: text(raw, REGISTRATION_LINK),
            media: media(raw, IMAGE, base),
        }
    }
}

impl Record for Course {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn media(&self) -> Option<&Media> {
        self.media.as_ref()
    }

    fn body(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }

    fn link(&self) -> Option<String> {
        (!self.slug.is_empty()).then(|| self.detail_path())
    }
}
