//! Result types returned by the conversion entry points.

use std::path::PathBuf;

use crate::error::DiagramError;

/// The outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Absolute path of the written PDF file.
    pub pdf_path: PathBuf,
    /// Aggregate statistics for the run.
    pub stats: ConversionStats,
}

/// Aggregate statistics for one conversion.
///
/// A conversion can succeed overall while individual diagrams failed; compare
/// `diagrams_failed` against `diagrams_total` to detect partial success.
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Number of diagram blocks found in the document.
    pub diagrams_total: usize,
    /// Number of diagrams replaced by an inline error fragment.
    pub diagrams_failed: usize,
    /// Wall-clock time spent rendering diagrams, in milliseconds.
    pub diagram_duration_ms: u64,
    /// Wall-clock time spent loading the composed page and emitting the PDF,
    /// in milliseconds.
    pub pdf_duration_ms: u64,
    /// Total wall-clock time for the conversion, in milliseconds.
    pub total_duration_ms: u64,
}

/// One rendered diagram, in document order.
///
/// `markup` is either normalized vector markup or, when `error` is set, a
/// visible inline error fragment that takes the diagram's place in the
/// document. Either way, exactly one placeholder is resolved by it.
#[derive(Debug, Clone)]
pub struct DiagramResult {
    /// Zero-based position of the diagram in document order. Identity for
    /// placeholder matching; assigned at extraction and never reused.
    pub index: usize,
    /// Vector markup on success, error fragment on failure.
    pub markup: String,
    /// Set when this diagram failed and `markup` is an error fragment.
    pub error: Option<DiagramError>,
}

impl DiagramResult {
    /// True when the renderer produced usable markup for this diagram.
    pub fn is_rendered(&self) -> bool {
        self.error.is_none()
    }
}
