//! Diagram block extraction.
//!
//! The Markdown compiler renders ```` ```mermaid ```` fences as
//! `<pre><code class="language-mermaid">…</code></pre>`. This stage lifts the
//! diagram source text out of those blocks and replaces each with a unique
//! placeholder token, keyed by its zero-based document-order index. Indices
//! are never reused; the composer later resolves each token exactly once.
//!
//! The compiler HTML-escapes raw text, so the extracted source is
//! entity-decoded before it is handed to the renderer.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Marker class the Markdown compiler puts on fenced diagram blocks.
const DIAGRAM_LANGUAGE_CLASS: &str = "language-mermaid";

static DIAGRAM_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-mermaid">(.*?)</code></pre>"#).unwrap()
});

/// Placeholder token for the diagram at `index`.
///
/// The surrounding braces make the token unambiguous: `{{DIAGRAM_1}}` can
/// never partially match `{{DIAGRAM_10}}`.
pub fn placeholder(index: usize) -> String {
    format!("{{{{DIAGRAM_{index}}}}}")
}

/// Extract fenced diagram blocks, replacing each with a placeholder token.
///
/// Returns the rewritten fragment and the decoded diagram sources in
/// document order. A fragment without diagram blocks is returned unchanged
/// with an empty list — the common case, short-circuited before any regex
/// work.
pub fn extract_diagram_blocks(html: &str) -> (String, Vec<String>) {
    if !html.contains(DIAGRAM_LANGUAGE_CLASS) {
        return (html.to_string(), Vec::new());
    }

    let mut sources = Vec::new();
    let rewritten = DIAGRAM_BLOCK_RE.replace_all(html, |caps: &Captures<'_>| {
        let index = sources.len();
        sources.push(decode_entities(caps[1].trim_end()));
        placeholder(index)
    });

    (rewritten.into_owned(), sources)
}

/// Decode the HTML entities the Markdown compiler escapes in raw text.
///
/// `&amp;` is decoded last so author-written entity text survives one level
/// of escaping intact.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
