//! Programs (workshops, residencies)

use super::FromCms;
use crate::normalize::{media, record_id, text_or};
use crate::record::{Media, Record, UNTITLED};
use gallery_common::time::format_date_range;
use gallery_common::BaseUrl;
use serde::Serialize;
use serde_json::Value;

const TITLE: &[&str] = &["titleProgram", "title"];
const START: &[&str] = &["start", "startDate"];
const END: &[&str] = &["end", "endDate"];
const PROGRAM_TYPE: &[&str] = &["programType", "type"];
const MEDIA: &[&str] = &["mediaProgram", "image"];

/// Program type tag used as the page filter (compared case-insensitively)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramType(pub String);

impl ProgramType {
    pub const WORKSHOP: &'static str = "Workshop";
    pub const RESIDENCY: &'static str = "Residency";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn workshop() -> Self {
        Self::new(Self::WORKSHOP)
    }

    pub fn residency() -> Self {
        Self::new(Self::RESIDENCY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_type(&self, raw: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(raw.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub start: String,
    pub end: String,
    pub program_type: String,
    pub media: Option<Media>,
}

impl FromCms for Program {
    fn from_cms(raw: &Value, base: &BaseUrl) -> Self {
        Self {
            id: record_id(raw),
            title: text_or(raw, TITLE, UNTITLED),
            start: text_or(raw, START, ""),
            end: text_or(raw, END, ""),
            program_type: text_or(raw, PROGRAM_TYPE, ""),
            media: media(raw, MEDIA, base),
        }
    }
}

impl Record for Program {
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
        let mut lines = Vec::new();
        let range = format_date_range(&self.start, &self.end);
        if !range.is_empty() {
            lines.push(range);
        }
        if !self.program_type.is_empty() {
            lines.push(format!("Type: {}", self.program_type));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_program() {
        let base = BaseUrl::parse("https://cms.example.com").unwrap();
        let raw = json!({
            "id": 4,
            "attributes": {
                "titleProgram": "Wheel Throwing",
                "start": "2024-03-01",
                "end": "2024-03-05",
                "programType": "workshop",
                "mediaProgram": {"data": {"attributes": {"url": "/uploads/wheel.png"}}}
            }
        });
        let program = Program::from_cms(&raw, &base);
        assert_eq!(program.title, "Wheel Throwing");
        assert_eq!(program.program_type, "workshop");
        assert_eq!(
            program.media.as_ref().unwrap().url,
            "https://cms.example.com/uploads/wheel.png"
        );
        assert_eq!(program.caption(), vec!["1 Mar 2024 - 5 Mar 2024", "Type: workshop"]);
    }

    #[test]
    fn test_program_type_matches_case_insensitively() {
        assert!(ProgramType::workshop().is_type("WORKSHOP"));
        assert!(ProgramType::residency().is_type(" residency "));
        assert!(!ProgramType::workshop().is_type("Residency"));
    }
}
