//! Conversion entry points.
//!
//! [`convert`] dispatches on the input extension: Markdown goes through the
//! full transformation pipeline, HTML is handed to the Page Renderer as-is.
//! Unsupported extensions fail before any browser work happens.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::assets;
use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::{compose, diagram, extract, figures, headings, markdown, pdf};

/// Convert a Markdown or HTML file to a branded PDF.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(ConvertError)` only for fatal errors; individual diagram
/// failures are embedded as visible error fragments and counted in
/// `stats.diagrams_failed`.
pub fn convert(
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("md" | "markdown") => markdown_to_pdf(input, output, config),
        Some("html" | "htm") => html_to_pdf(input, output, config),
        _ => Err(ConvertError::UnsupportedExtension {
            path: input.to_path_buf(),
        }),
    }
}

/// Convert a Markdown file through the full transformation pipeline.
pub fn markdown_to_pdf(
    md_path: &Path,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    info!("converting {}", md_path.display());

    // ── Step 1: Read source ──────────────────────────────────────────────
    if !md_path.is_file() {
        return Err(ConvertError::InputNotFound {
            path: md_path.to_path_buf(),
        });
    }
    let source = std::fs::read_to_string(md_path).map_err(|source| ConvertError::InputRead {
        path: md_path.to_path_buf(),
        source,
    })?;

    // ── Step 2: Compile Markdown ─────────────────────────────────────────
    let source = markdown::strip_html_comments(&source);
    let mut html = markdown::compile(&source);

    // ── Step 3: Extract and render diagrams ──────────────────────────────
    let (with_placeholders, sources) = extract::extract_diagram_blocks(&html);
    html = with_placeholders;

    let diagram_start = Instant::now();
    let rendered = diagram::render_diagrams(&sources, config)?;
    let diagram_duration_ms = diagram_start.elapsed().as_millis() as u64;

    compose::embed_diagrams(&mut html, &rendered)?;

    // ── Step 4: Classify headings, derive title ──────────────────────────
    html = headings::classify_headings(&html);
    let title = headings::document_title(&html)
        .unwrap_or_else(|| config.title_fallback.clone());
    debug!("document title: {title}");

    // ── Step 5: Group diagrams with their labels ─────────────────────────
    if !rendered.is_empty() {
        html = figures::group_figures(&html);
    }

    // ── Step 6: Compose the branded document ─────────────────────────────
    let template = assets::load_template(config.template_path.as_deref())?;
    let document = compose::compose_document(&html, &title, &template, assets::branding())?;

    // ── Step 7: Print to PDF ─────────────────────────────────────────────
    // The composed page lives in a NamedTempFile so it is removed when this
    // function returns, on success and on error alike.
    let page = tempfile::Builder::new()
        .prefix("brandpress-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| ConvertError::Internal(format!("failed to create temp page: {e}")))?;
    std::fs::write(page.path(), &document)
        .map_err(|e| ConvertError::Internal(format!("failed to write temp page: {e}")))?;

    let pdf_start = Instant::now();
    let written = pdf::render_pdf(page.path(), pdf_path, config)?;
    let pdf_duration_ms = pdf_start.elapsed().as_millis() as u64;

    let stats = ConversionStats {
        diagrams_total: rendered.len(),
        diagrams_failed: rendered.iter().filter(|r| !r.is_rendered()).count(),
        diagram_duration_ms,
        pdf_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "conversion complete: {} diagram(s), {} failed, {}ms total",
        stats.diagrams_total, stats.diagrams_failed, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        pdf_path: written,
        stats,
    })
}

/// Convert an HTML file to PDF directly, without branding injection.
pub fn html_to_pdf(
    html_path: &Path,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    info!("converting {}", html_path.display());

    let pdf_start = Instant::now();
    let written: PathBuf = pdf::render_pdf(html_path, pdf_path, config)?;
    let pdf_duration_ms = pdf_start.elapsed().as_millis() as u64;

    Ok(ConversionOutput {
        pdf_path: written,
        stats: ConversionStats {
            pdf_duration_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
            ..ConversionStats::default()
        },
    })
}
