//! Configuration types for document-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A many-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::ConvertError;
use std::path::PathBuf;

/// Default URL of the diagram renderer ES module loaded into the harness page.
pub const DEFAULT_DIAGRAM_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";

/// Configuration for a document-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use brandpress::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .renderer_ready_timeout_secs(20)
///     .title_fallback("Untitled")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// How long to wait for the diagram renderer's readiness signal. Default: 15.
    ///
    /// The harness page imports the renderer module from a CDN, so first use
    /// on a cold cache can take several seconds. Exceeding this bound is a
    /// fatal environment failure for the whole batch — there is no point
    /// attempting individual diagrams against a renderer that never loaded.
    pub renderer_ready_timeout_secs: u64,

    /// Upper bound for a single diagram render, in seconds. Default: 10.
    ///
    /// A diagram that exceeds this yields a visible inline error fragment;
    /// the rest of the batch continues. The same bound caps the PDF page's
    /// settle wait (all images decoded) before emission.
    pub diagram_timeout_secs: u64,

    /// Extra grace wait applied once when the page-settle poll times out,
    /// in milliseconds. Default: 2000.
    ///
    /// A timeout here degrades to this single fixed wait rather than
    /// aborting the conversion.
    pub load_grace_ms: u64,

    /// Optional path to an HTML template overriding the bundled one.
    ///
    /// The file must contain the same named placeholders as the bundled
    /// template. An unreadable override is a fatal error — no partial output
    /// is produced from a half-configured template.
    pub template_path: Option<PathBuf>,

    /// Document title used when the content has no top-level heading.
    /// Default: "Document".
    pub title_fallback: String,

    /// URL of the diagram renderer script imported by the harness page.
    /// Default: [`DEFAULT_DIAGRAM_SCRIPT_URL`].
    pub diagram_script_url: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            renderer_ready_timeout_secs: 15,
            diagram_timeout_secs: 10,
            load_grace_ms: 2000,
            template_path: None,
            title_fallback: "Document".to_string(),
            diagram_script_url: DEFAULT_DIAGRAM_SCRIPT_URL.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Create a builder with default values.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Set the diagram renderer readiness timeout in seconds.
    pub fn renderer_ready_timeout_secs(mut self, secs: u64) -> Self {
        self.config.renderer_ready_timeout_secs = secs;
        self
    }

    /// Set the per-diagram render timeout in seconds.
    pub fn diagram_timeout_secs(mut self, secs: u64) -> Self {
        self.config.diagram_timeout_secs = secs;
        self
    }

    /// Set the page-settle grace wait in milliseconds.
    pub fn load_grace_ms(mut self, ms: u64) -> Self {
        self.config.load_grace_ms = ms;
        self
    }

    /// Use an HTML template file instead of the bundled one.
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = Some(path.into());
        self
    }

    /// Set the title used when the document has no top-level heading.
    pub fn title_fallback(mut self, title: impl Into<String>) -> Self {
        self.config.title_fallback = title.into();
        self
    }

    /// Override the diagram renderer script URL.
    pub fn diagram_script_url(mut self, url: impl Into<String>) -> Self {
        self.config.diagram_script_url = url.into();
        self
    }

    /// Validate and build the final configuration.
    ///
    /// # Errors
    /// Returns [`ConvertError::Internal`] when a timeout is zero or the
    /// renderer script URL is empty.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = self.config;
        if c.renderer_ready_timeout_secs == 0 {
            return Err(ConvertError::Internal(
                "renderer_ready_timeout_secs must be at least 1".to_string(),
            ));
        }
        if c.diagram_timeout_secs == 0 {
            return Err(ConvertError::Internal(
                "diagram_timeout_secs must be at least 1".to_string(),
            ));
        }
        if c.diagram_script_url.is_empty() {
            return Err(ConvertError::Internal(
                "diagram_script_url must not be empty".to_string(),
            ));
        }
        Ok(c)
    }
}
