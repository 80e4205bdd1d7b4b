//! About page content

use super::FromCms;
use crate::normalize::{media, record_id, text_or};
use crate::record::Media;
use gallery_common::BaseUrl;
use serde::Serialize;
use serde_json::Value;

const TITLE: &[&str] = &["judulAbout", "title"];
const CONTENT: &[&str] = &["isiAbout", "content"];
const IMAGE: &[&str] = &["imageAbout", "image"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct About {
    pub id: i64,
    pub title: String,
    /// Plain text, paragraphs separated by blank lines
    pub content: String,
    pub media: Option<Media>,
}

impl About {
    /// True when there is nothing to show
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.media.is_none()
    }
}

impl FromCms for About {
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, TITLE, ""),
            content: text_or(raw, CONTENT, ""),
            media: media(raw, IMAGE, base),
        }
    }
}
