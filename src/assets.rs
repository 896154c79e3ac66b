//! Bundled branding assets and the HTML template.
//!
//! The brand images ship inside the binary and are exposed as `data:` URIs so
//! the composed document is fully self-contained — no file or network
//! requests at render time, which keeps PDF output deterministic. They are
//! encoded once per process and are read-only afterwards.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use once_cell::sync::Lazy;

use crate::error::ConvertError;

/// The bundled branded template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.html");

/// The fixed set of brand images substituted into the template.
#[derive(Debug)]
pub struct BrandingAssets {
    /// Page header banner.
    pub header: String,
    /// Page footer banner.
    pub footer: String,
    /// Section heading background strip.
    pub h2_background: String,
    /// Full-page background decoration.
    pub bg_decoration: String,
}

static BRANDING: Lazy<BrandingAssets> = Lazy::new(|| BrandingAssets {
    header: png_data_uri(include_bytes!("../assets/branding/header.png")),
    footer: png_data_uri(include_bytes!("../assets/branding/footer.png")),
    h2_background: png_data_uri(include_bytes!("../assets/branding/h2-background.png")),
    bg_decoration: png_data_uri(include_bytes!("../assets/branding/bg-decoration.png")),
});

/// The bundled brand images, encoded on first access.
pub fn branding() -> &'static BrandingAssets {
    &BRANDING
}

fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(bytes))
}

/// Load the template: an override file when configured, the bundled template
/// otherwise.
///
/// # Errors
/// Returns [`ConvertError::TemplateUnreadable`] when the override path cannot
/// be read. The bundled template cannot fail.
pub fn load_template(override_path: Option<&Path>) -> Result<String, ConvertError> {
    match override_path {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|source| ConvertError::TemplateUnreadable {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}
