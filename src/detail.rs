//! Read-only detail view of one entry
//!
//! `DetailView` holds the display-ready fields; `render_html` interpolates them
//! into an HTML fragment. Every interpolated value is escaped and the image
//! source is restricted to http(s) or relative references.

use crate::config::Assets;
use crate::model::{Entry, EntryId};
use chrono::{DateTime, NaiveDate, Utc};

/// Shown for absent or unparseable dates
pub const UNKNOWN_DATE: &str = "?";

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: Option<EntryId>,
    pub image: String,
    pub alt: String,
    pub display_name: String,
    pub birth: String,
    pub death: String,
    pub description: String,
}

impl DetailView {
    pub fn from_entry(entry: &Entry, assets: &Assets) -> Self {
        Self {
            id: entry.id.clone(),
            image: entry
                .image_url
                .clone()
                .unwrap_or_else(|| assets.placeholder_image.clone()),
            alt: entry.name.clone(),
            display_name: entry.display_name(),
            birth: format_display_date(entry.birth_date.as_deref()),
            death: format_display_date(entry.death_date.as_deref()),
            description: entry.description.clone().unwrap_or_default(),
        }
    }

    /// `MM/DD/YYYY - MM/DD/YYYY`
    pub fn dates_line(&self) -> String {
        format!("{} - {}", self.birth, self.death)
    }

    /// Sanitised HTML fragment for the detail dialog
    pub fn render_html(&self, assets: &Assets) -> String {
        let src = if is_safe_image_src(&self.image) {
            self.image.as_str()
        } else {
            assets.placeholder_image.as_str()
        };

        format!(
            r#"<button class="detail-close" id="detailCloseBtn">×</button>
<div class="detail-image-frame">
    <img src="{src}" alt="{alt}" />
</div>
<h2 class="detail-name">{name}</h2>
<p class="detail-dates">{dates}</p>
<p class="detail-description">{description}</p>
<div class="detail-actions">
    <button class="detail-edit-btn" id="detailEditBtn">Edit</button>
    <button class="detail-delete-btn" id="detailDeleteBtn">Delete</button>
</div>"#,
            src = escape_html(src),
            alt = escape_html(&self.alt),
            name = escape_html(&self.display_name),
            dates = escape_html(&self.dates_line()),
            description = escape_html(&self.description),
        )
    }
}

/// Format an ISO-8601 instant as `MM/DD/YYYY` in UTC
pub fn format_display_date(raw: Option<&str>) -> String {
    raw.and_then(parse_instant)
        .map(|dt| dt.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Parse a full RFC 3339 instant or a bare `YYYY-MM-DD` (taken as UTC midnight)
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Only http(s) URLs and scheme-less relative references may be used as image sources
pub fn is_safe_image_src(src: &str) -> bool {
    let src = src.trim();
    if src.is_empty() {
        return false;
    }
    match url::Url::parse(src) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        // No scheme: relative path; reject anything that still looks like `scheme:`
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            !src.starts_with("//") && !src.contains(':')
        }
        Err(_) => false,
    }
}
