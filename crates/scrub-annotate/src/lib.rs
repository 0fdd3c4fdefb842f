//! Annotation production for scrub
//!
//! This crate contains:
//! - The template engine: declarative, resolution-independent annotation
//!   sets expanded into concrete annotations for an image size
//! - Redaction synthesis: detected PII regions plus manually drawn
//!   redactions turned into `Redact` annotations

pub mod redact;
pub mod template;

pub use redact::{REDACTION_COLOR, synthesize_redactions};
pub use template::{
    Template, TemplateError, TemplateGeometry, TemplateShape, apply_template, builtin_templates,
    load_templates,
};
