//! Figure grouping: keep each diagram with its label across page breaks.
//!
//! A heading or short paragraph directly above a diagram usually captions it.
//! Print layout may otherwise place the caption at the bottom of one page and
//! the diagram at the top of the next, so this stage wraps the pair in a
//! container the template styles with `page-break-inside: avoid`.
//!
//! The fragment is partitioned into chunks at the open tags of a small fixed
//! set of block-level elements. This is deliberately not HTML parsing:
//! malformed or nested markup beyond this tag set is out of contract.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:h[1-6]|p|div|ul|ol|table|blockquote|hr|pre|img)[\s>/]").unwrap()
});

static HEADING_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<h[1-6][\s>]").unwrap());
static PARAGRAPH_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<p[\s>]").unwrap());

/// Marker identifying an embedded diagram image inside a chunk.
const DIAGRAM_IMG_MARKER: &str = r#"class="diagram-img""#;

/// Split the fragment into block-level chunks.
///
/// Boundaries sit immediately before each block open tag; chunk
/// concatenation reproduces the input byte-for-byte.
fn split_blocks(html: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut prev = 0usize;
    for m in BLOCK_OPEN_RE.find_iter(html) {
        if m.start() > prev {
            chunks.push(&html[prev..m.start()]);
            prev = m.start();
        }
    }
    chunks.push(&html[prev..]);
    chunks
}

/// True when a chunk can act as the caption/label for a following diagram.
fn is_label(chunk: &str) -> bool {
    let lead = chunk.trim_start();
    HEADING_OPEN_RE.is_match(lead) || PARAGRAPH_OPEN_RE.is_match(lead)
}

/// Wrap each diagram image, together with an immediately preceding heading
/// or paragraph, in a keep-together container. Chunks not adjacent to a
/// diagram pass through unchanged and in order.
pub fn group_figures(html: &str) -> String {
    let mut result: Vec<String> = Vec::new();

    for chunk in split_blocks(html) {
        if !chunk.contains(DIAGRAM_IMG_MARKER) {
            result.push(chunk.to_string());
            continue;
        }

        let group = match result.pop() {
            Some(prev) if is_label(&prev) => {
                format!(r#"<div class="diagram-figure">{prev}{chunk}</div>"#)
            }
            Some(prev) => {
                result.push(prev);
                format!(r#"<div class="diagram-figure">{chunk}</div>"#)
            }
            None => format!(r#"<div class="diagram-figure">{chunk}</div>"#),
        };
        result.push(group);
    }

    result.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram_img(n: usize) -> String {
        format!(r#"<img class="diagram-img" src="data:image/svg+xml;base64,Zm9v" alt="Diagram {n}">"#)
    }

    #[test]
    fn split_reassembles_byte_identical() {
        let html = "<h2>Section</h2>\n<p>para</p>\n<ul><li>item</li></ul>";
        assert_eq!(split_blocks(html).concat(), html);
    }

    #[test]
    fn heading_and_diagram_merge_into_one_group() {
        let html = format!("<h3>Flow</h3>\n{}", diagram_img(1));
        let out = group_figures(&html);
        assert_eq!(out.matches("diagram-figure").count(), 1);
        let figure_start = out.find(r#"<div class="diagram-figure">"#).unwrap();
        let h3 = out.find("<h3>Flow</h3>").unwrap();
        let img = out.find("diagram-img").unwrap();
        assert!(figure_start < h3 && h3 < img);
        assert!(out.ends_with("</div>"));
    }

    #[test]
    fn paragraph_label_merges_too() {
        let html = format!("<p>Figure 1: overview</p>\n{}", diagram_img(1));
        let out = group_figures(&html);
        assert!(out.contains(r#"<div class="diagram-figure"><p>Figure 1: overview</p>"#));
    }

    #[test]
    fn diagram_without_label_wraps_alone() {
        let html = format!("<ul><li>a list</li></ul>{}", diagram_img(1));
        let out = group_figures(&html);
        assert!(out.contains("<ul><li>a list</li></ul>"));
        assert!(out.contains(&format!(
            r#"<div class="diagram-figure">{}</div>"#,
            diagram_img(1)
        )));
    }

    #[test]
    fn leading_diagram_wraps_alone() {
        let html = diagram_img(1);
        let out = group_figures(&html);
        assert!(out.starts_with(r#"<div class="diagram-figure">"#));
    }

    #[test]
    fn unrelated_chunks_keep_their_order() {
        let html = format!(
            "<h1>Doc</h1><p>intro</p><h2>A</h2>{}<p>tail</p>",
            diagram_img(1)
        );
        let out = group_figures(&html);
        let h1 = out.find("<h1>Doc</h1>").unwrap();
        let intro = out.find("<p>intro</p>").unwrap();
        let figure = out.find("diagram-figure").unwrap();
        let tail = out.find("<p>tail</p>").unwrap();
        assert!(h1 < intro && intro < figure && figure < tail);
        // The intro paragraph is not adjacent to the diagram: it stays out.
        assert!(!out.contains(r#"<div class="diagram-figure"><p>intro</p>"#));
    }

    #[test]
    fn two_diagrams_each_get_a_group() {
        let html = format!(
            "<h2>First</h2>{}<h2>Second</h2>{}",
            diagram_img(1),
            diagram_img(2)
        );
        let out = group_figures(&html);
        assert_eq!(out.matches("diagram-figure").count(), 2);
    }

    #[test]
    fn no_diagram_is_untouched() {
        let html = "<h1>Doc</h1><p>text only</p>";
        assert_eq!(group_figures(html), html);
    }
}
