//! Markdown compilation: source text to an HTML body fragment.
//!
//! The Markdown dialect itself is external — `pulldown-cmark` does the
//! translation. This stage only decides the enabled extensions and strips
//! HTML comments beforehand, since authors use those for notes that must not
//! leak into the rendered PDF.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Remove HTML comments from Markdown source.
pub fn strip_html_comments(markdown: &str) -> String {
    COMMENT_RE.replace_all(markdown, "").into_owned()
}

/// Compile Markdown to an HTML fragment.
///
/// Tables, footnotes, strikethrough, and task lists are enabled; fenced code
/// blocks are core CommonMark and come out as
/// `<pre><code class="language-…">` — the shape the diagram extractor
/// matches on.
pub fn compile(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_line_comment() {
        assert_eq!(
            strip_html_comments("before <!-- note --> after"),
            "before  after"
        );
    }

    #[test]
    fn strips_multi_line_comment() {
        let md = "keep\n<!--\ndraft paragraph\nstill draft\n-->\nkeep too";
        let out = strip_html_comments(md);
        assert!(!out.contains("draft"));
        assert!(out.contains("keep"));
        assert!(out.contains("keep too"));
    }

    #[test]
    fn no_comment_is_untouched() {
        let md = "# Title\n\nplain body";
        assert_eq!(strip_html_comments(md), md);
    }

    #[test]
    fn compile_headings_and_paragraph() {
        let html = compile("# Title\n\nBody text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn compile_fenced_block_carries_language_class() {
        let html = compile("```mermaid\ngraph TD;\n  A --> B;\n```");
        assert!(html.contains(r#"<pre><code class="language-mermaid">"#));
        // The compiler escapes special characters in raw text.
        assert!(html.contains("A --&gt; B;"));
    }

    #[test]
    fn compile_tables_enabled() {
        let html = compile("| A | B |\n| --- | --- |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
    }
}
