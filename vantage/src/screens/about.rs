//! Static about page.

use crate::screens::{ScreenDeps, templates};
use serde_json::json;
use std::rc::Rc;
use vantage_core::{
    ElementRef, NavigatorRef, TemplateRef, View, ViewError, ViewFactory, ViewRef,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// Static content; paints once and reacts to nothing.
pub struct AboutScreen {
    scope: ViewScope,
    templates: TemplateRef,
}

impl AboutScreen {
    /// Builds the screen over `root`. Acquires nothing.
    pub fn new(root: ElementRef, deps: ScreenDeps) -> Rc<Self> {
        Rc::new(Self {
            scope: ViewScope::new(root, deps.bus),
            templates: deps.templates,
        })
    }

    /// Factory for the route table.
    pub fn factory(deps: &ScreenDeps) -> ViewFactory {
        view_factory(deps.clone(), |root, _nav: NavigatorRef, deps| {
            Ok(AboutScreen::new(root, deps) as ViewRef)
        })
    }
}

impl View for AboutScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        let html = self.templates.render(templates::ABOUT, &json!({}))?;
        self.scope.root().set_html(&html);
        Ok(())
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
