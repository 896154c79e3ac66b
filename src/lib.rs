//! # brandpress
//!
//! Convert Markdown and HTML documents into branded PDF files using headless
//! Chrome.
//!
//! ## Why this crate?
//!
//! Hand-maintaining page layout for every exported document does not scale.
//! brandpress takes plain Markdown (or a ready HTML page), runs it through a
//! deterministic transformation pipeline — diagram rendering, branding
//! injection, print-safe figure grouping — and delegates pagination to a real
//! browser engine, so the PDF looks exactly like the page Chrome would print.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Compile   Markdown → HTML fragment (pulldown-cmark)
//!  ├─ 2. Extract   lift fenced diagram blocks into placeholder tokens
//!  ├─ 3. Render    diagram sources → SVG in a browser harness page
//!  ├─ 4. Normalize strip fixed SVG dimensions so CSS controls scaling
//!  ├─ 5. Classify  tag the document title / subtitle headings
//!  ├─ 6. Group     keep each diagram with its label across page breaks
//!  ├─ 7. Compose   content + title + branding → self-contained document
//!  └─ 8. Print     headless Chrome → Letter-format PDF, zero margins
//! ```
//!
//! The pipeline is single-threaded and strictly sequential; the only waits
//! are bounded (renderer readiness, per-diagram render, page settle). A
//! fresh browser process is launched per adapter step and torn down
//! unconditionally when it goes out of scope.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use brandpress::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert(Path::new("handbook.md"), Path::new("handbook.pdf"), &config)?;
//!     println!("{}", output.pdf_path.display());
//!     eprintln!(
//!         "diagrams: {} rendered, {} failed",
//!         output.stats.diagrams_total - output.stats.diagrams_failed,
//!         output.stats.diagrams_failed
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! One bad diagram never loses the document: it is replaced by a visible
//! inline error marker and the conversion still emits a PDF. Fatal errors
//! ([`ConvertError`]) are reserved for problems no partial output can
//! honestly survive — missing input, unreadable template, a browser that
//! will not launch, a diagram renderer that never becomes ready.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `brandpress` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod assets;
pub mod browser;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use browser::ensure_engine_available;
pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_DIAGRAM_SCRIPT_URL};
pub use convert::{convert, html_to_pdf, markdown_to_pdf};
pub use error::{ConvertError, DiagramError};
pub use output::{ConversionOutput, ConversionStats, DiagramResult};
