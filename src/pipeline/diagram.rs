//! Diagram rendering via the external renderer inside a browser page.
//!
//! The renderer is a JavaScript library; the only portable way to run it is
//! a real browser. A minimal harness page imports the renderer module and
//! exposes one function; this adapter navigates a fresh scoped session to
//! it, waits for the readiness flag, then renders each diagram source in
//! document order through an awaited promise.
//!
//! Failure surface: readiness never signalled → fatal for the whole batch
//! (the environment is broken, not one diagram). A single render failing or
//! timing out → that diagram becomes a visible inline error fragment and the
//! batch continues.

use std::io::Write as _;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::{file_url, BrowserSession};
use crate::config::ConversionConfig;
use crate::error::{ConvertError, DiagramError};
use crate::output::DiagramResult;
use crate::pipeline::svg;

/// Harness page; `__SCRIPT_URL__` is filled with the configured renderer URL.
const HARNESS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="UTF-8"></head><body>
<script type="module">
import mermaid from '__SCRIPT_URL__';
mermaid.initialize({ startOnLoad: false, theme: 'default', securityLevel: 'loose',
    flowchart: { useMaxWidth: true, htmlLabels: true }, sequence: { useMaxWidth: true } });
window.renderDiagram = async function (id, source, timeoutMs) {
    const render = mermaid.render(id, source).then((result) => result.svg);
    const expiry = new Promise((resolve, reject) => {
        setTimeout(() => reject(new Error('render timed out after ' + timeoutMs + 'ms')), timeoutMs);
    });
    return Promise.race([render, expiry]);
};
window.__diagramReady = true;
</script></body></html>
"#;

/// Render each diagram source to normalized vector markup, one result per
/// input in the same order.
///
/// # Errors
/// Fatal only for environment-level failures: browser launch, harness
/// navigation, or the renderer readiness timeout. Per-diagram failures are
/// recorded inside the returned [`DiagramResult`]s.
pub fn render_diagrams(
    sources: &[String],
    config: &ConversionConfig,
) -> Result<Vec<DiagramResult>, ConvertError> {
    if sources.is_empty() {
        return Ok(Vec::new());
    }
    info!("rendering {} diagram(s)", sources.len());

    let harness = HARNESS_TEMPLATE.replace("__SCRIPT_URL__", &config.diagram_script_url);
    let mut page = tempfile::Builder::new()
        .prefix("brandpress-diagrams-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| ConvertError::Internal(format!("failed to create harness page: {e}")))?;
    page.write_all(harness.as_bytes())
        .map_err(|e| ConvertError::Internal(format!("failed to write harness page: {e}")))?;

    let session = BrowserSession::launch()?;
    session.navigate(&file_url(page.path())?)?;

    let ready = session.poll_until(
        "window.__diagramReady === true",
        Duration::from_secs(config.renderer_ready_timeout_secs),
    )?;
    if !ready {
        return Err(ConvertError::RendererUnready {
            secs: config.renderer_ready_timeout_secs,
        });
    }
    debug!("diagram renderer ready");

    let timeout_ms = config.diagram_timeout_secs * 1000;
    let mut results = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        match session.eval_string(&render_call(index, source, timeout_ms)) {
            Ok(markup) if markup.trim_start().starts_with("<svg") => {
                debug!("diagram {index} rendered ({} bytes)", markup.len());
                results.push(DiagramResult {
                    index,
                    markup: svg::normalize_svg(&markup),
                    error: None,
                });
            }
            Ok(_) => {
                warn!("diagram {index}: renderer returned no markup");
                results.push(failed(index, DiagramError::NoOutput { index }));
            }
            Err(e) => {
                warn!("diagram {index} failed: {e}");
                results.push(failed(
                    index,
                    DiagramError::RenderFailed {
                        index,
                        detail: e.to_string(),
                    },
                ));
            }
        }
    }

    Ok(results)
}

/// Build the in-page render call with the source JSON-escaped.
fn render_call(index: usize, source: &str, timeout_ms: u64) -> String {
    let id = serde_json::Value::String(format!("diagram-pre-{index}"));
    let source = serde_json::Value::String(source.to_string());
    format!("window.renderDiagram({id}, {source}, {timeout_ms})")
}

fn failed(index: usize, error: DiagramError) -> DiagramResult {
    DiagramResult {
        index,
        markup: error_fragment(index, &error.to_string()),
        error: Some(error),
    }
}

/// A visibly-marked inline fragment taking a failed diagram's place.
pub fn error_fragment(index: usize, detail: &str) -> String {
    format!(
        r#"<div class="diagram-error">Diagram {} failed to render: {}</div>"#,
        index + 1,
        escape_text(detail)
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
