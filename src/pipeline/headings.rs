//! Heading classification: document title and subtitle.
//!
//! The branded template styles the document's title block differently from
//! body headings. This stage tags the first top-level heading as the title
//! and, only when a second-level heading immediately follows it (whitespace
//! aside), tags that one as the subtitle. At most one of each is ever
//! classified no matter how many headings the document has; everything else
//! keeps its default heading style.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<h1([^>]*)>(.*?)</h1>").unwrap());

static SUBTITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)(<h1[^>]*class="doc-title"[^>]*>.*?</h1>\s*)<h2([^>]*)>(.*?)</h2>"#).unwrap()
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Tag the first `<h1>` as `doc-title` and an immediately following `<h2>`
/// as `doc-subtitle`. A fragment without a top-level heading is returned
/// unchanged.
pub fn classify_headings(html: &str) -> String {
    let with_title = H1_RE.replace(html, |c: &Captures<'_>| {
        format!(r#"<h1{} class="doc-title">{}</h1>"#, &c[1], &c[2])
    });
    SUBTITLE_RE
        .replace(&with_title, |c: &Captures<'_>| {
            format!(r#"{}<h2{} class="doc-subtitle">{}</h2>"#, &c[1], &c[2], &c[3])
        })
        .into_owned()
}

/// The text of the first top-level heading, inline markup stripped.
///
/// Returns `None` when the fragment has no `<h1>` (or an empty one); callers
/// fall back to the configured default title.
pub fn document_title(html: &str) -> Option<String> {
    let caps = H1_RE.captures(html)?;
    let text = TAG_RE.replace_all(&caps[2], "").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
