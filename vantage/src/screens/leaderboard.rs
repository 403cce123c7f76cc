//! Score table screen.

use crate::screens::{ScreenDeps, render_handler, templates};
use serde_json::{Value, json};
use std::rc::Rc;
use vantage_core::{
    ElementRef, Event, InputEvent, InputKind, LeaderboardControllerRef, NavigatorRef, Payload,
    TemplateRef, View, ViewError, ViewFactory, ViewRef, topic,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// Rows shown per page.
pub const PAGE_SIZE: u32 = 5;

const FIRST_PAGE: u32 = 1;

/// Paginated score table.
///
/// Pagination anchors carry a bare page number as their href and no
/// routing attribute, so the anchor interceptor ignores them and the
/// screen's own delegated click listener claims them instead. A click
/// requests the page; the repaint happens when `leaderboard-loaded`
/// arrives. The listener is registered once in `init`, so repaints stay
/// acquisition-free.
pub struct LeaderboardScreen {
    scope: ViewScope,
    templates: TemplateRef,
    boards: LeaderboardControllerRef,
}

impl LeaderboardScreen {
    /// Builds the screen over `root`. Acquires nothing.
    pub fn new(root: ElementRef, deps: ScreenDeps) -> Rc<Self> {
        Rc::new(Self {
            scope: ViewScope::new(root, deps.bus),
            templates: deps.templates,
            boards: deps.boards,
        })
    }

    /// Factory for the route table.
    pub fn factory(deps: &ScreenDeps) -> ViewFactory {
        view_factory(deps.clone(), |root, _nav: NavigatorRef, deps| {
            Ok(LeaderboardScreen::new(root, deps) as ViewRef)
        })
    }

    fn paint(&self, board: &Value) -> Result<(), ViewError> {
        let users = board.get("users").cloned().unwrap_or_else(|| json!([]));
        let page_count = board.get("page_count").and_then(Value::as_u64).unwrap_or(0);
        let current_page = board
            .get("current_page")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let pages: Vec<u64> = (1..=page_count).collect();
        let html = self.templates.render(
            templates::LEADERBOARD,
            &json!({
                "users": users,
                "page_count": page_count,
                "current_page": current_page,
                "pages": pages,
                "size": PAGE_SIZE,
            }),
        )?;
        self.scope.root().set_html(&html);
        Ok(())
    }

    fn on_click(&self, event: &InputEvent) {
        let Some(anchor) = event.anchor.as_ref() else {
            return;
        };
        // Routed anchors belong to the interceptor.
        if anchor.route.is_some() {
            return;
        }
        let Some(page) = anchor
            .href
            .as_deref()
            .and_then(|href| href.parse::<u32>().ok())
        else {
            return;
        };
        event.prevent_default();
        self.boards.fetch_page(page);
    }
}

impl View for LeaderboardScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        self.paint(&json!({}))?;
        self.scope
            .subscribe(topic::LEADERBOARD_LOADED, render_handler(&self));
        let weak = Rc::downgrade(&self);
        self.scope.listen(
            InputKind::Click,
            Rc::new(move |event: &InputEvent| {
                if let Some(screen) = weak.upgrade() {
                    screen.on_click(event);
                }
            }),
        );
        self.boards.fetch_page(FIRST_PAGE);
        Ok(())
    }

    fn render(&self, event: &Event) {
        if !self.scope.is_live() || event.topic != topic::LEADERBOARD_LOADED {
            return;
        }
        if let Payload::Data(board) = &event.value
            && let Err(_err) = self.paint(board)
        {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_err, "leaderboard repaint failed");
        }
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
