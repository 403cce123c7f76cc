//! Markup rendering capability.

use serde_json::Value;
use std::rc::Rc;
use thiserror::Error;

/// Renders named templates against JSON contexts.
///
/// Screens hold a `TemplateRef` and render by template name; the engine
/// implementation decides where template sources live.
pub trait TemplateEngine {
    /// Renders `template` with `context` into markup.
    fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError>;
}

/// Shared handle to a template engine.
pub type TemplateRef = Rc<dyn TemplateEngine>;

/// Why a template could not produce markup.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template registered under this name.
    #[error("unknown template `{0}`")]
    Unknown(String),

    /// The template source failed to compile.
    #[error("template `{template}` failed to compile: {message}")]
    Compile {
        /// Template name.
        template: String,
        /// Engine-reported failure.
        message: String,
    },

    /// Rendering failed against the given context.
    #[error("template `{template}` failed to render: {message}")]
    Render {
        /// Template name.
        template: String,
        /// Engine-reported failure.
        message: String,
    },
}
