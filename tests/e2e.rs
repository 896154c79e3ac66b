//! End-to-end integration tests for brandpress.
//!
//! The pipeline-level tests run everywhere. Tests that need a live Chrome
//! (and, for diagrams, network access to the renderer CDN) are gated behind
//! the `BRANDPRESS_E2E` environment variable so they do not run in CI unless
//! explicitly requested.
//!
//! Run with:
//!   BRANDPRESS_E2E=1 cargo test --test e2e -- --nocapture

use std::path::PathBuf;

use brandpress::output::DiagramResult;
use brandpress::pipeline::{compose, diagram, extract, figures, headings, markdown};
use brandpress::{convert, ConversionConfig, ConvertError, DiagramError};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip this test unless BRANDPRESS_E2E is set.
macro_rules! e2e_skip_unless_enabled {
    () => {
        if std::env::var("BRANDPRESS_E2E").is_err() {
            println!("SKIP — set BRANDPRESS_E2E=1 to run browser e2e tests");
            return;
        }
    };
}

const SAMPLE_MARKDOWN: &str = r#"# Quarterly Review

## Engineering Report

Intro paragraph with **bold** text.

### System Flow

```mermaid
graph TD;
  A[Start] --> B{Decide};
  B --> C[Done];
```

| Metric | Value |
| ------ | ----- |
| Uptime | 99.9% |

Closing remarks.
"#;

/// Run the non-browser part of the pipeline with canned diagram results.
fn compose_with_diagrams(md: &str, rendered: Vec<DiagramResult>) -> String {
    let source = markdown::strip_html_comments(md);
    let mut html = markdown::compile(&source);
    let (with_placeholders, sources) = extract::extract_diagram_blocks(&html);
    html = with_placeholders;
    assert_eq!(sources.len(), rendered.len(), "test fixture mismatch");

    compose::embed_diagrams(&mut html, &rendered).expect("embedding must succeed");
    html = headings::classify_headings(&html);
    let title = headings::document_title(&html).unwrap_or_else(|| "Document".to_string());
    if !rendered.is_empty() {
        html = figures::group_figures(&html);
    }
    compose::compose_document(
        &html,
        &title,
        brandpress::assets::DEFAULT_TEMPLATE,
        brandpress::assets::branding(),
    )
    .expect("composition must succeed")
}

fn rendered_ok(index: usize) -> DiagramResult {
    DiagramResult {
        index,
        markup: format!(r#"<svg viewBox="0 0 100 60"><text>d{index}</text></svg>"#),
        error: None,
    }
}

fn rendered_failed(index: usize) -> DiagramResult {
    let error = DiagramError::RenderFailed {
        index,
        detail: "parse error".into(),
    };
    DiagramResult {
        index,
        markup: diagram::error_fragment(index, &error.to_string()),
        error: Some(error),
    }
}

// ── Pipeline tests (no browser, always run) ──────────────────────────────────

#[test]
fn composed_document_resolves_every_placeholder() {
    let doc = compose_with_diagrams(SAMPLE_MARKDOWN, vec![rendered_ok(0)]);

    assert!(!doc.contains("{{DIAGRAM_"), "no diagram placeholders may remain");
    assert!(!doc.contains("{{TITLE}}"));
    assert!(!doc.contains("{{CONTENT}}"));
    assert!(!doc.contains("{{HEADER_IMG}}"));
    assert!(doc.contains("<title>Quarterly Review</title>"));
    assert!(doc.contains("data:image/svg+xml;base64,"));
}

#[test]
fn title_and_subtitle_classified_exactly_once() {
    let html = markdown::compile("# Title\n\n## Sub\n\nBody text.");
    let html = headings::classify_headings(&html);

    assert_eq!(html.matches("doc-title").count(), 1);
    assert_eq!(html.matches("doc-subtitle").count(), 1);
    assert!(html.contains(r#"<h1 class="doc-title">Title</h1>"#));
    assert!(html.contains(r#"<h2 class="doc-subtitle">Sub</h2>"#));
}

#[test]
fn failed_diagram_keeps_the_rest_of_the_document() {
    let md = "# Doc\n\nFirst section.\n\n```mermaid\nbroken source\n```\n\nSecond section.\n";
    let doc = compose_with_diagrams(md, vec![rendered_failed(0)]);

    assert!(doc.contains("First section."));
    assert!(doc.contains("Second section."));
    assert!(doc.contains(r#"class="diagram-error""#));
    assert!(doc.contains("Diagram 1 failed to render"));
    // The marker sits where the diagram was: between the two sections.
    let first = doc.find("First section.").unwrap();
    let marker = doc.find(r#"class="diagram-error""#).unwrap();
    let second = doc.find("Second section.").unwrap();
    assert!(first < marker && marker < second);
}

#[test]
fn mixed_success_and_failure_keeps_order() {
    let md = "# Doc\n\n```mermaid\none\n```\n\nmiddle\n\n```mermaid\ntwo\n```\n";
    let doc = compose_with_diagrams(md, vec![rendered_ok(0), rendered_failed(1)]);

    let img = doc.find(r#"class="diagram-img""#).unwrap();
    let middle = doc.find("<p>middle</p>").unwrap();
    let marker = doc.find(r#"class="diagram-error""#).unwrap();
    assert!(img < middle && middle < marker);
}

#[test]
fn diagram_heading_grouped_for_print() {
    let doc = compose_with_diagrams(SAMPLE_MARKDOWN, vec![rendered_ok(0)]);
    let figure = doc.find(r#"<div class="diagram-figure">"#).unwrap();
    let heading = doc.find("System Flow").unwrap();
    let img = doc.find(r#"class="diagram-img""#).unwrap();
    assert!(figure < heading && heading < img);
}

#[test]
fn plain_document_composes_without_diagram_work() {
    let doc = compose_with_diagrams("# Just Text\n\nNo diagrams here.\n", vec![]);
    assert!(doc.contains("No diagrams here."));
    assert!(!doc.contains(r#"class="diagram-img""#));
    assert!(!doc.contains(r#"class="diagram-figure""#));
}

#[test]
fn unsupported_extension_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "not a document").unwrap();
    let output = dir.path().join("notes.pdf");

    let err = convert(&input, &output, &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedExtension { .. }));
    assert!(!output.exists());
}

#[test]
fn missing_template_override_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    std::fs::write(&input, "# Doc\n\nbody\n").unwrap();
    let output = dir.path().join("doc.pdf");

    let config = ConversionConfig::builder()
        .template_path(dir.path().join("missing-template.html"))
        .build()
        .unwrap();

    let err = convert(&input, &output, &config).unwrap_err();
    assert!(matches!(err, ConvertError::TemplateUnreadable { .. }));
    assert!(!output.exists());
}

// ── Browser e2e tests (need Chrome; diagram tests also need the CDN) ─────────

fn workspace_tmp() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/e2e-output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

#[test]
fn e2e_markdown_without_diagrams_to_pdf() {
    e2e_skip_unless_enabled!();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.md");
    std::fs::write(&input, "# Plain\n\nJust a paragraph.\n").unwrap();
    let output = workspace_tmp().join("plain.pdf");

    let result = convert(&input, &output, &ConversionConfig::default())
        .expect("conversion should succeed");

    let bytes = std::fs::read(&result.pdf_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "output must be a PDF");
    assert_eq!(result.stats.diagrams_total, 0);
    println!("[plain] {} bytes → {}", bytes.len(), result.pdf_path.display());
}

#[test]
fn e2e_markdown_with_diagram_to_pdf() {
    e2e_skip_unless_enabled!();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("diagram.md");
    std::fs::write(&input, SAMPLE_MARKDOWN).unwrap();
    let output = workspace_tmp().join("diagram.pdf");

    let result = convert(&input, &output, &ConversionConfig::default())
        .expect("conversion should succeed");

    let bytes = std::fs::read(&result.pdf_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(result.stats.diagrams_total, 1);
    assert_eq!(result.stats.diagrams_failed, 0, "diagram should render");
    println!(
        "[diagram] {} bytes, diagram render {}ms",
        bytes.len(),
        result.stats.diagram_duration_ms
    );
}

#[test]
fn e2e_broken_diagram_still_emits_pdf() {
    e2e_skip_unless_enabled!();

    let md = "# Doc\n\n```mermaid\nthis is not a diagram at all {{{\n```\n\nStill here.\n";
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.md");
    std::fs::write(&input, md).unwrap();
    let output = workspace_tmp().join("broken.pdf");

    let result = convert(&input, &output, &ConversionConfig::default())
        .expect("conversion must survive a failing diagram");

    assert!(std::fs::read(&result.pdf_path).unwrap().starts_with(b"%PDF"));
    assert_eq!(result.stats.diagrams_total, 1);
    assert_eq!(result.stats.diagrams_failed, 1);
}

#[test]
fn e2e_html_passthrough_to_pdf() {
    e2e_skip_unless_enabled!();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    std::fs::write(
        &input,
        "<!DOCTYPE html><html><body><h1>As-is</h1><p>raw page</p></body></html>",
    )
    .unwrap();
    let output = workspace_tmp().join("page.pdf");

    let result = convert(&input, &output, &ConversionConfig::default())
        .expect("conversion should succeed");

    assert!(std::fs::read(&result.pdf_path).unwrap().starts_with(b"%PDF"));
}
