pub mod detect;
pub mod redact;
pub mod template;
