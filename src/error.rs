//! Error types for the brandpress library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] — **Fatal**: the conversion cannot proceed at all
//!   (missing input, unsupported extension, template unreadable, browser
//!   engine failed to launch or navigate). Returned as `Err(ConvertError)`
//!   from the top-level `convert*` functions.
//!
//! * [`DiagramError`] — **Non-fatal**: a single diagram failed to render.
//!   The diagram is replaced with a visible inline error fragment and the
//!   conversion continues; the error is kept inside
//!   [`crate::output::DiagramResult`] so callers can inspect partial success
//!   rather than losing the whole document to one bad diagram.
//!
//! The separation lets callers decide their own tolerance: inspect
//! `stats.diagrams_failed` after the fact, or treat any diagram failure as a
//! hard error on their side.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the brandpress library.
///
/// Per-diagram failures use [`DiagramError`] and are stored in
/// [`crate::output::DiagramResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The input extension is neither Markdown nor HTML.
    #[error("unsupported input type '{path}': expected .md, .markdown, .html or .htm")]
    UnsupportedExtension { path: PathBuf },

    /// The input file exists but could not be read.
    #[error("failed to read input '{path}': {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Template errors ───────────────────────────────────────────────────
    /// A template override file was missing or unreadable.
    #[error("template unreadable: '{path}': {source}")]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template is missing a placeholder the composer must substitute.
    #[error("template is missing the '{{{{{name}}}}}' placeholder")]
    MissingPlaceholder { name: String },

    /// A placeholder token survived substitution. Unresolved placeholders in
    /// the composed document are a defect, never silent pass-through.
    #[error("placeholder '{token}' was not substituted")]
    UnresolvedPlaceholder { token: String },

    // ── Browser engine errors ─────────────────────────────────────────────
    /// Headless Chrome could not be launched.
    #[error(
        "failed to launch the browser engine: {detail}\n\
         Install Chrome or Chromium, or point CHROME to an executable."
    )]
    BrowserLaunch { detail: String },

    /// Page navigation failed (bad URL, crashed tab).
    #[error("page navigation failed for '{url}': {detail}")]
    Navigation { url: String, detail: String },

    /// An in-page script evaluation failed at the session level.
    #[error("in-page evaluation failed: {detail}")]
    Evaluate { detail: String },

    /// The diagram renderer never signalled readiness. This is an
    /// environment-level failure for the whole batch, not a per-diagram one.
    #[error("diagram renderer not ready after {secs}s; check network access to the renderer script")]
    RendererUnready { secs: u64 },

    /// The browser failed to produce PDF bytes.
    #[error("PDF emission failed: {detail}")]
    PdfEmit { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single diagram.
///
/// Stored alongside [`crate::output::DiagramResult`] when a diagram fails.
/// The overall conversion continues and still emits a PDF.
#[derive(Debug, Clone, Error)]
pub enum DiagramError {
    /// The renderer rejected the diagram source or timed out on it.
    #[error("diagram {index}: rendering failed: {detail}")]
    RenderFailed { index: usize, detail: String },

    /// The renderer completed but returned something other than markup.
    #[error("diagram {index}: renderer returned no markup")]
    NoOutput { index: usize },
}
