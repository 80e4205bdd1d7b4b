//! Shape normalization helpers
//!
//! CMS entries come either flat (`{id, title, ...}`) or wrapped
//! (`{id, attributes: {title, ...}}`), relations and media may sit under a
//! `data` wrapper, and some fields carry historical aliases. Each field is
//! described by an ordered alias list of dotted paths; numeric segments
//! index arrays (`imageArchive.0.url`).
//!
//! Resolution order for every alias: the flattened location, then the same
//! path under `attributes`. The first alias yielding a non-null value wins.
//! Nothing here fails; absent values fall back to the caller's default.

use crate::record::{Media, Relation, UNTITLED};
use gallery_common::BaseUrl;
use serde_json::Value;

/// Wrapper key used by nested CMS payloads
pub const ATTRIBUTES: &str = "attributes";

/// Media variants tried before the original upload, best first
const MEDIA_URL_PATHS: &[&str] = &["formats.webp.url", "formats.small.url", "url"];

const MEDIA_ALT_PATHS: &[&str] = &["alternativeText", "alt"];

/// Follow a dotted path through objects and arrays
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// Resolve the first present alias, flattened location before `attributes`
pub fn resolve<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let nested = raw.get(ATTRIBUTES).filter(|v| v.is_object());

    aliases.iter().find_map(|alias| {
        lookup(raw, alias).or_else(|| nested.and_then(|attrs| lookup(attrs, alias)))
    })
}

/// Non-empty string (numbers are stringified); `None` otherwise
pub fn text(raw: &Value, aliases: &[&str]) -> Option<String> {
    let nested = raw.get(ATTRIBUTES).filter(|v| v.is_object());

    aliases.iter().find_map(|alias| {
        lookup(raw, alias)
            .and_then(as_text)
            .or_else(|| nested.and_then(|attrs| lookup(attrs, alias)).and_then(as_text))
    })
}

/// [`text`] with a default
pub fn text_or(raw: &Value, aliases: &[&str], default: &str) -> String {
    text(raw, aliases).unwrap_or_else(|| default.to_string())
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Record id (`id` flattened or nested); `0` when absent
pub fn record_id(raw: &Value) -> i64 {
    resolve(raw, &["id"]).and_then(as_id).unwrap_or(0)
}

/// Strip `{data: ...}` and array wrappers
fn unwrap_node(mut node: &Value) -> Option<&Value> {
    loop {
        node = match node {
            Value::Array(items) => items.first()?,
            Value::Object(map) if map.contains_key("data") => map.get("data")?,
            Value::Null => return None,
            _ => return Some(node),
        };
    }
}

/// Resolve a media reference from the first alias that yields a URL
///
/// Accepts a plain object, the `data.attributes` wrapper, or an array of
/// candidates (first wins). The optimized `webp`/`small` variants are
/// preferred over the original upload.
pub fn media(raw: &Value, aliases: &[&str], base: &BaseUrl) -> Option<Media> {
    aliases
        .iter()
        .filter_map(|alias| resolve(raw, &[*alias]))
        .find_map(|node| media_from_node(node, base))
}

fn media_from_node(node: &Value, base: &BaseUrl) -> Option<Media> {
    let node = unwrap_node(node)?;

    // A bare string is already a URL
    if let Value::String(url) = node {
        return (!url.trim().is_empty()).then(|| Media {
            url: base.absolutize(url.trim()),
            alt_text: None,
        });
    }

    let url = text(node, MEDIA_URL_PATHS)?;
    Some(Media {
        url: base.absolutize(url.trim()),
        alt_text: text(node, MEDIA_ALT_PATHS),
    })
}

/// Resolve a to-one relation
///
/// Accepts `{id, <name>}`, `{data: {id, attributes: {<name>}}}` or a bare id.
/// A relation without a usable id is treated as absent.
pub fn relation(raw: &Value, aliases: &[&str], name_aliases: &[&str]) -> Option<Relation> {
    let node = unwrap_node(resolve(raw, aliases)?)?;

    if let Some(id) = as_id(node) {
        return Some(Relation {
            id,
            name: UNTITLED.to_string(),
        });
    }

    if !node.is_object() {
        return None;
    }

    let id = resolve(node, &["id"]).and_then(as_id)?;
    Some(Relation {
        id,
        name: text_or(node, name_aliases, UNTITLED),
    })
}

/// Entries of a to-many relation (`[...]` or `{data: [...]}`)
pub fn related_list<'a>(raw: &'a Value, aliases: &[&str]) -> Vec<&'a Value> {
    let Some(node) = resolve(raw, aliases) else {
        return Vec::new();
    };
    let node = match node {
        Value::Object(map) if map.contains_key("data") => match map.get("data") {
            Some(data) => data,
            None => return Vec::new(),
        },
        other => other,
    };
    match node {
        Value::Array(items) => items.iter().filter(|v| v.is_object()).collect(),
        Value::Object(_) => vec![node],
        _ => Vec::new(),
    }
}
