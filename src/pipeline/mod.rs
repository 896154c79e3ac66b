//! Pipeline stages for document-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different diagram renderer) without touching
//! other stages. All stages preserve document order; no stage reorders
//! content outside its own transformation.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ extract ──▶ diagram ──▶ svg ──▶ headings ──▶ figures ──▶ compose ──▶ pdf
//! (compile)   (lift out)  (render)  (scale)   (classify)   (group)    (template)  (emit)
//! ```
//!
//! 1. [`markdown`] — strip HTML comments, compile Markdown to an HTML fragment
//! 2. [`extract`]  — lift fenced diagram blocks out into placeholder tokens
//! 3. [`diagram`]  — render each diagram source to vector markup in a browser
//!    harness page; per-diagram failures become inline error fragments
//! 4. [`svg`]      — normalize rendered markup so CSS controls its size
//! 5. [`headings`] — tag the document title / subtitle headings for styling
//! 6. [`figures`]  — wrap each diagram with its label so print layout keeps
//!    them on one page
//! 7. [`compose`]  — substitute content, title, and branding into the template
//! 8. [`pdf`]      — load the composed page and emit the PDF

pub mod compose;
pub mod diagram;
pub mod extract;
pub mod figures;
pub mod headings;
pub mod markdown;
pub mod pdf;
pub mod svg;
