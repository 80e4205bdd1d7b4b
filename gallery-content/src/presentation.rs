//! HTML rendering of page state
//!
//! Pure functions of a [`ViewState`] and its derived view. Output order:
//! loading indicator, error panel (alongside any stale grid), filter tabs,
//! grid, modal overlay. Interactive elements carry `data-action` hooks:
//! `select-filter`, `select-record`, `close` (backdrop and close button) and
//! `contain` on the modal body, which maps to [`ModalTarget::Body`].
//!
//! Plain CMS strings are entity-encoded with `html_escape`. Description
//! fields carry HTML and go through `ammonia`; About content is Markdown,
//! rendered with `pulldown-cmark` and then sanitized the same way.
//!
//! [`ModalTarget::Body`]: crate::store::ModalTarget::Body

use crate::content::{About, ContactInfo, Course, ExhibitionArtwork, ExhibitionDetail};
use crate::derive::{is_registration_closed, Unfiltered, ViewFilter};
use crate::record::{Media, Record};
use crate::store::ViewState;
use chrono::NaiveDateTime;
use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{html as markdown_html, Options, Parser};
use std::fmt::Write;

/// Category label for records whose collection is unknown or missing
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Per-page text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChrome {
    pub heading: String,
    pub loading_text: String,
    pub empty_text: String,
}

impl PageChrome {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            loading_text: "Loading...".to_string(),
            empty_text: "Nothing to show yet.".to_string(),
        }
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }
}

/// Plain text to paragraphs (blank line separated, single newlines kept)
pub fn render_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let lines: Vec<String> = p.lines().map(|l| encode_text(l.trim()).into_owned()).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// CMS rich text (HTML) as a sanitized fragment
///
/// Text without markup falls back to [`render_paragraphs`]. Markup is passed
/// through `ammonia`, which strips scripts, event handlers and unknown tags.
pub fn render_rich_text(text: &str) -> String {
    if looks_like_html(text) {
        ammonia::clean(text.trim())
    } else {
        render_paragraphs(text)
    }
}

/// Markdown to a sanitized HTML fragment
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut raw = String::new();
    markdown_html::push_html(&mut raw, parser);
    ammonia::clean(&raw)
}

fn looks_like_html(text: &str) -> bool {
    text.match_indices('<').any(|(i, _)| {
        text[i + 1..]
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '/' || c == '!')
    })
}

/// Category label for a record on a relation-filtered page
///
/// `None` when the page has no relation filters. Records without a relation,
/// or whose relation is not among the page's filters, are "Uncategorized".
pub fn category_label<R, F>(state: &ViewState<R, F>, record: &R) -> Option<String>
where
    R: Record,
    F: ViewFilter<R>,
{
    if !state.filters.iter().any(|opt| opt.value.relation_id().is_some()) {
        return None;
    }

    let label = record
        .relation()
        .and_then(|rel| {
            state
                .filters
                .iter()
                .find(|opt| opt.value.relation_id() == Some(rel.id))
        })
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    Some(label)
}

/// Full list page: heading plus [`render_view`]
pub fn render_page<R, F>(chrome: &PageChrome, state: &ViewState<R, F>, derived: &[&R]) -> String
where
    R: Record,
    F: ViewFilter<R> + PartialEq,
{
    format!(
        "<section class=\"page\">\n<h1>{}</h1>\n{}</section>\n",
        encode_text(&chrome.heading),
        render_view(chrome, state, derived)
    )
}

/// State panels, filters, grid and modal for one page
pub fn render_view<R, F>(chrome: &PageChrome, state: &ViewState<R, F>, derived: &[&R]) -> String
where
    R: Record,
    F: ViewFilter<R> + PartialEq,
{
    let mut html = String::new();

    if state.loading {
        let _ = writeln!(
            html,
            "<p class=\"loading\" role=\"status\">{}</p>",
            encode_text(&chrome.loading_text)
        );
    }

    if let Some(error) = &state.error {
        let _ = writeln!(
            html,
            "<div class=\"error-panel\" role=\"alert\">{}</div>",
            encode_text(error)
        );
    }

    html.push_str(&render_filters(state));

    if derived.is_empty() {
        if !state.loading {
            let _ = writeln!(
                html,
                "<p class=\"empty\">{}</p>",
                encode_text(&chrome.empty_text)
            );
        }
    } else {
        html.push_str("<div class=\"grid\">\n");
        for record in derived {
            let position = state.records.iter().position(|r| std::ptr::eq(r, *record));
            html.push_str(&render_card(
                *record,
                position,
                category_label(state, *record).as_deref(),
            ));
        }
        html.push_str("</div>\n");
    }

    if state.modal_open {
        if let Some(record) = &state.selected_record {
            html.push_str(&render_modal(record, category_label(state, record).as_deref()));
        }
    }

    html
}

fn render_filters<R, F: PartialEq>(state: &ViewState<R, F>) -> String {
    if state.filters.is_empty() {
        return String::new();
    }

    let mut html = String::from("<nav class=\"filters\">\n");
    for (index, option) in state.filters.iter().enumerate() {
        let active = state.selected_filter.as_ref() == Some(&option.value);
        let _ = writeln!(
            html,
            "<button type=\"button\" class=\"filter{}\" data-action=\"select-filter\" data-filter-index=\"{}\" aria-pressed=\"{}\">{}</button>",
            if active { " active" } else { "" },
            index,
            active,
            encode_text(&option.label)
        );
    }
    html.push_str("</nav>\n");

    let selected = state
        .selected_filter
        .as_ref()
        .and_then(|sel| state.filters.iter().find(|opt| &opt.value == sel));
    if let Some(option) = selected.filter(|opt| !opt.description.is_empty()) {
        let _ = writeln!(
            html,
            "<div class=\"filter-description\">{}</div>",
            render_rich_text(&option.description)
        );
    }

    html
}

fn render_media(media: Option<&Media>, title: &str) -> String {
    match media {
        Some(media) => format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            encode_double_quoted_attribute(&media.url),
            encode_double_quoted_attribute(media.alt_text.as_deref().unwrap_or(title))
        ),
        None => "<div class=\"media-placeholder\">No Image</div>".to_string(),
    }
}

/// One grid card
///
/// `position` is the record's index in the store (`data-record-index`), the
/// selection key for entries whose id is missing.
pub fn render_card<R: Record>(record: &R, position: Option<usize>, category: Option<&str>) -> String {
    let index_attr = position
        .map(|i| format!(" data-record-index=\"{}\"", i))
        .unwrap_or_default();
    let mut inner = String::new();
    inner.push_str(&render_media(record.media(), record.title()));
    let _ = write!(inner, "<h2>{}</h2>", encode_text(record.title()));
    for line in record.caption() {
        let _ = write!(inner, "<p>{}</p>", encode_text(&line));
    }
    if let Some(category) = category {
        let _ = write!(
            inner,
            "<p class=\"category\">Collection: {}</p>",
            encode_text(category)
        );
    }

    match record.link() {
        Some(link) => format!(
            "<a class=\"card\" href=\"{}\" data-record-id=\"{}\"{}>{}</a>\n",
            encode_double_quoted_attribute(&link),
            record.id(),
            index_attr,
            inner
        ),
        None => format!(
            "<article class=\"card\" data-action=\"select-record\" data-record-id=\"{}\"{}>{}</article>\n",
            record.id(),
            index_attr,
            inner
        ),
    }
}

/// Modal overlay for the selected record
pub fn render_modal<R: Record>(record: &R, category: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(
        "<button type=\"button\" class=\"modal-close\" data-action=\"close\" aria-label=\"Close\">&times;</button>",
    );
    if let Some(media) = record.media() {
        body.push_str(&render_media(Some(media), record.title()));
    }
    let _ = write!(body, "<h2>{}</h2>", encode_text(record.title()));
    for line in record.caption() {
        let _ = write!(body, "<p>{}</p>", encode_text(&line));
    }
    if let Some(category) = category {
        let _ = write!(
            body,
            "<p class=\"category\">Collection: {}</p>",
            encode_text(category)
        );
    }
    match record.body() {
        Some(text) => {
            let _ = write!(body, "<div class=\"modal-text\">{}</div>", render_rich_text(text));
        }
        None => body.push_str("<p class=\"modal-text empty\">No description available.</p>"),
    }

    format!(
        "<div class=\"modal-backdrop\" data-action=\"close\">\n<div class=\"modal\" role=\"dialog\" data-action=\"contain\">{}</div>\n</div>\n",
        body
    )
}

/// Course detail with the registration link disabled once registration closed
pub fn render_course_detail(course: &Course, now: NaiveDateTime) -> String {
    let mut html = String::from("<section class=\"course-detail\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", encode_text(&course.title));
    if let Some(media) = &course.media {
        let _ = writeln!(html, "{}", render_media(Some(media), &course.title));
    }
    let _ = writeln!(
        html,
        "<h2>Schedule</h2>\n<p class=\"schedule\">{}</p>",
        encode_text(&course.schedule)
    );
    let _ = writeln!(
        html,
        "<h2>Description</h2>\n<div class=\"description\">{}</div>",
        render_rich_text(&course.description)
    );

    if let Some(link) = &course.registration_link {
        if is_registration_closed(&course.schedule, now) {
            html.push_str(
                "<a class=\"register closed\" aria-disabled=\"true\" tabindex=\"-1\">Registration Closed</a>\n",
            );
        } else {
            let _ = writeln!(
                html,
                "<a class=\"register\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Register Now</a>",
                encode_double_quoted_attribute(link)
            );
        }
    }

    html.push_str("</section>\n");
    html
}

pub fn render_about(about: &About) -> String {
    let mut html = String::from("<section class=\"about\">\n<h1>About us</h1>\n");

    if about.is_blank() {
        html.push_str("<p class=\"empty\">No about content yet.</p>\n");
    } else {
        if !about.title.is_empty() {
            let _ = writeln!(html, "<h2>{}</h2>", encode_text(&about.title));
        }
        if !about.content.is_empty() {
            let _ = writeln!(html, "<div class=\"content\">{}</div>", render_markdown(&about.content));
        }
        if let Some(media) = &about.media {
            let alt = if about.title.is_empty() { "About image" } else { about.title.as_str() };
            let _ = writeln!(html, "{}", render_media(Some(media), alt));
        }
    }

    html.push_str("</section>\n");
    html
}

pub fn render_contact(info: &ContactInfo) -> String {
    format!(
        "<section class=\"contact\">\n<h1>{}</h1>\n<h2>{}</h2>\n<p>{}</p>\n<h3>{}</h3>\n<p class=\"address\">{}</p>\n</section>\n",
        encode_text(&info.heading),
        encode_text(&info.tagline),
        encode_text(&info.body),
        encode_text(&info.address_label),
        encode_text(&info.address)
    )
}

/// Exhibition detail header plus its artwork grid and modal
pub fn render_exhibition_detail(
    detail: &ExhibitionDetail,
    state: &ViewState<ExhibitionArtwork, Unfiltered>,
    derived: &[&ExhibitionArtwork],
) -> String {
    let chrome = PageChrome::new(&detail.title)
        .with_empty_text("There are no artworks in this exhibition.");

    format!(
        "<section class=\"exhibition-detail\">\n<h1>{}</h1>\n<div class=\"description\">{}</div>\n{}</section>\n",
        encode_text(&detail.title),
        render_rich_text(&detail.description),
        render_view(&chrome, state, derived)
    )
}

/// Panel shown when a singular record does not exist
pub fn render_not_found(message: &str) -> String {
    format!(
        "<section class=\"not-found\">\n<h1>Not found</h1>\n<p>{}</p>\n</section>\n",
        encode_text(message)
    )
}
