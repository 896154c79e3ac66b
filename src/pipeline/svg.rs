//! Vector markup normalization.
//!
//! Rendered diagrams arrive with fixed pixel dimensions baked into the root
//! element. Print layout needs them to scale with the page instead, so this
//! stage removes the fixed `width`/`height`/`style` attributes from the root
//! tag and guarantees a `viewBox` — synthesized from the original dimensions
//! when the renderer omitted one — so the aspect ratio survives CSS scaling.
//!
//! Only the root open tag is touched; nested elements keep their geometry.
//! Non-markup input (error fragments) passes through unchanged, and
//! re-normalizing already-normalized markup is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

static WIDTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\swidth="([0-9.]+)[^"]*""#).unwrap());
static HEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\sheight="([0-9.]+)[^"]*""#).unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\sstyle="[^"]*""#).unwrap());

/// Normalize one rendered diagram so surrounding CSS controls its size.
pub fn normalize_svg(markup: &str) -> String {
    if !markup.trim_start().starts_with("<svg") {
        return markup.to_string();
    }
    let Some(tag_end) = markup.find('>') else {
        return markup.to_string();
    };
    let (open_tag, rest) = markup.split_at(tag_end + 1);
    let mut tag = open_tag.to_string();

    // Capture the fixed dimensions before removing them; they seed the
    // synthesized viewBox when none exists.
    let width = WIDTH_RE.captures(&tag).map(|c| c[1].to_string());
    let height = HEIGHT_RE.captures(&tag).map(|c| c[1].to_string());

    if !tag.contains("viewBox") {
        if let (Some(w), Some(h)) = (&width, &height) {
            tag = tag.replacen("<svg", &format!(r#"<svg viewBox="0 0 {w} {h}""#), 1);
        }
    }

    let tag = WIDTH_RE.replace(&tag, "");
    let tag = HEIGHT_RE.replace(&tag, "");
    let tag = STYLE_RE.replace(&tag, "");

    format!("{tag}{rest}")
}
