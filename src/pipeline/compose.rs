//! Template composition: content, title, and branding into one document.
//!
//! Templating is a deliberately minimal contract — literal token
//! substitution, no expression language. What makes it safe is the explicit
//! check: any `{{…}}` token the composer does not recognize fails the
//! conversion, never silent pass-through. The template is scanned before any
//! substitution, so brace tokens inside user content can never trip it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::assets::BrandingAssets;
use crate::error::ConvertError;
use crate::output::DiagramResult;
use crate::pipeline::extract;

/// Content slot; substituted last, exactly once.
pub const CONTENT_TOKEN: &str = "{{CONTENT}}";

/// Every token the composer substitutes.
const RECOGNIZED_TOKENS: &[&str] = &[
    "{{TITLE}}",
    "{{HEADER_IMG}}",
    "{{FOOTER_IMG}}",
    "{{H2_BACKGROUND_IMG}}",
    "{{BG_DECORATION_IMG}}",
    CONTENT_TOKEN,
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[A-Z][A-Z0-9_]*\}\}").unwrap());

/// Merge the transformed content, title, and branding assets into the
/// template, producing the final self-contained document.
///
/// The template is scanned before any substitution, while every `{{…}}` in
/// sight still belongs to it — brace tokens arriving later inside the title
/// or content are plain text, not placeholders.
///
/// # Errors
/// - [`ConvertError::UnresolvedPlaceholder`] when the template carries a
///   token the composer does not recognize, or more than one content slot.
/// - [`ConvertError::MissingPlaceholder`] when the template has no content
///   slot at all.
pub fn compose_document(
    content: &str,
    title: &str,
    template: &str,
    branding: &BrandingAssets,
) -> Result<String, ConvertError> {
    if let Some(token) = TOKEN_RE
        .find_iter(template)
        .map(|m| m.as_str())
        .find(|t| !RECOGNIZED_TOKENS.contains(t))
    {
        return Err(ConvertError::UnresolvedPlaceholder {
            token: token.to_string(),
        });
    }
    match template.matches(CONTENT_TOKEN).count() {
        0 => {
            return Err(ConvertError::MissingPlaceholder {
                name: "CONTENT".to_string(),
            })
        }
        1 => {}
        _ => {
            return Err(ConvertError::UnresolvedPlaceholder {
                token: CONTENT_TOKEN.to_string(),
            })
        }
    }

    let document = template
        .replace("{{HEADER_IMG}}", &branding.header)
        .replace("{{FOOTER_IMG}}", &branding.footer)
        .replace("{{H2_BACKGROUND_IMG}}", &branding.h2_background)
        .replace("{{BG_DECORATION_IMG}}", &branding.bg_decoration)
        .replace("{{TITLE}}", title);

    Ok(document.replacen(CONTENT_TOKEN, content, 1))
}

/// Resolve every diagram placeholder in the fragment.
///
/// Rendered markup is embedded as a base64 `data:` image so the document
/// stays self-contained; error fragments are inserted verbatim so the
/// failure is visible at the diagram's position.
///
/// # Errors
/// [`ConvertError::Internal`] when a placeholder that should exist is
/// already gone — the extractor and embedder disagree about indices.
pub fn embed_diagrams(
    html: &mut String,
    rendered: &[DiagramResult],
) -> Result<(), ConvertError> {
    for diagram in rendered {
        let token = extract::placeholder(diagram.index);
        if !html.contains(&token) {
            return Err(ConvertError::Internal(format!(
                "placeholder {token} missing before embedding"
            )));
        }
        let replacement = if diagram.is_rendered() {
            let encoded = BASE64.encode(diagram.markup.as_bytes());
            format!(
                r#"<img class="diagram-img" src="data:image/svg+xml;base64,{encoded}" alt="Diagram {}">"#,
                diagram.index + 1
            )
        } else {
            diagram.markup.clone()
        };
        *html = html.replace(&token, &replacement);
    }
    Ok(())
}
