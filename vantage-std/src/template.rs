//! Handlebars-backed template engine.

use handlebars::Handlebars;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use vantage_core::{TemplateEngine, TemplateError, TemplateRef};

/// [`TemplateEngine`] over an in-process [`Handlebars`] registry.
///
/// Templates are registered by name up front, usually from sources embedded
/// with `include_str!`. Rendering is non-strict: fields missing from the
/// context come out blank, which lets a screen prerender its skeleton
/// against an empty context and repaint once real data arrives.
pub struct HandlebarsEngine {
    registry: RefCell<Handlebars<'static>>,
}

impl HandlebarsEngine {
    /// Creates an engine with no templates registered.
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(Handlebars::new()),
        }
    }

    /// Creates an empty engine behind a shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Compiles and registers `source` under `name`.
    pub fn register(&self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.registry
            .borrow_mut()
            .register_template_string(name, source)
            .map_err(|err| TemplateError::Compile {
                template: name.to_owned(),
                message: err.to_string(),
            })
    }

    /// Registers a batch of `(name, source)` pairs, stopping at the first
    /// compile failure.
    pub fn register_all<'a, I>(&self, templates: I) -> Result<(), TemplateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, source) in templates {
            self.register(name, source)?;
        }
        Ok(())
    }

    /// Whether a template is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.registry.borrow().has_template(name)
    }

    /// Erases to the capability handle screens consume.
    pub fn into_ref(self: Rc<Self>) -> TemplateRef {
        self
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError> {
        let registry = self.registry.borrow();
        if !registry.has_template(template) {
            return Err(TemplateError::Unknown(template.to_owned()));
        }
        registry
            .render(template, context)
            .map_err(|err| TemplateError::Render {
                template: template.to_owned(),
                message: err.to_string(),
            })
    }
}
