//! PDF emission: load the composed document and print it.
//!
//! The composed document is fully self-contained (all images are `data:`
//! URIs), so once navigation completes and every image has decoded there is
//! nothing left in flight and the page is visually stable. The settle poll is
//! bounded; on timeout the adapter degrades to one short fixed grace wait
//! rather than aborting — a slightly-late diagram beats no PDF at all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use tracing::{debug, info, warn};

use crate::browser::{file_url, BrowserSession};
use crate::config::ConversionConfig;
use crate::error::ConvertError;

/// US Letter, in inches.
const LETTER_WIDTH_IN: f64 = 8.5;
const LETTER_HEIGHT_IN: f64 = 11.0;

/// JS condition: document loaded and every image finished decoding.
const SETTLE_CONDITION: &str =
    "document.readyState === 'complete' && Array.from(document.images).every((img) => img.complete)";

/// Load `html_path` in the Page Renderer and write a PDF to `pdf_path`.
///
/// Returns the absolute path of the written file.
///
/// # Errors
/// [`ConvertError::InputNotFound`] when the input path does not exist —
/// checked before any browser work. Launch, navigation, and emission
/// failures are fatal; the scoped session still tears the browser down.
pub fn render_pdf(
    html_path: &Path,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<PathBuf, ConvertError> {
    if !html_path.is_file() {
        return Err(ConvertError::InputNotFound {
            path: html_path.to_path_buf(),
        });
    }

    let url = file_url(html_path)?;
    let session = BrowserSession::launch()?;
    session.navigate(&url)?;
    debug!("navigated to {url}");

    let settled =
        session.poll_until(SETTLE_CONDITION, Duration::from_secs(config.diagram_timeout_secs))?;
    if !settled {
        warn!(
            "page did not settle within {}s; printing after a {}ms grace wait",
            config.diagram_timeout_secs, config.load_grace_ms
        );
        std::thread::sleep(Duration::from_millis(config.load_grace_ms));
    }

    let bytes = session
        .tab()
        .print_to_pdf(Some(letter_no_margins()))
        .map_err(|e| ConvertError::PdfEmit {
            detail: e.to_string(),
        })?;

    if let Some(parent) = pdf_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ConvertError::OutputWrite {
                path: pdf_path.to_path_buf(),
                source,
            })?;
        }
    }
    std::fs::write(pdf_path, &bytes).map_err(|source| ConvertError::OutputWrite {
        path: pdf_path.to_path_buf(),
        source,
    })?;
    let abs = pdf_path
        .canonicalize()
        .map_err(|source| ConvertError::OutputWrite {
            path: pdf_path.to_path_buf(),
            source,
        })?;

    info!("PDF written: {} ({} bytes)", abs.display(), bytes.len());
    Ok(abs)
}

/// Letter paper, background graphics on, zero margins on all sides — the
/// template supplies its own margins via layout.
fn letter_no_margins() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        paper_width: Some(LETTER_WIDTH_IN),
        paper_height: Some(LETTER_HEIGHT_IN),
        margin_top: Some(0.0),
        margin_bottom: Some(0.0),
        margin_left: Some(0.0),
        margin_right: Some(0.0),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}
