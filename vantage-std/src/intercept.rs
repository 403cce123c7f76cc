//! Delegated anchor click interception.

use std::cell::Cell;
use std::rc::Rc;
use vantage_core::{ElementRef, InputEvent, InputKind, ListenerId, NavigatorRef};

/// One delegated click listener that turns opted-in anchor clicks into
/// router navigations.
///
/// Interception is deliberately narrow. A click is claimed only when it
/// landed on an internal anchor carrying the routing opt-in attribute,
/// with no modifier keys held. Everything else keeps its native behavior:
/// external links, plain anchors, modified clicks (open in new tab), and
/// clicks that hit no anchor at all.
///
/// When a click is claimed its default is suppressed first, then the
/// navigator runs; a navigation failure is logged and swallowed, the
/// click handler has nowhere to return it.
pub struct AnchorInterceptor {
    root: ElementRef,
    listener: Cell<Option<ListenerId>>,
}

impl AnchorInterceptor {
    /// Installs the listener on `root` and starts intercepting.
    pub fn install(root: ElementRef, nav: NavigatorRef) -> Self {
        let id = root.add_listener(
            InputKind::Click,
            Rc::new(move |event: &InputEvent| {
                let Some(path) = intercept_target(event) else {
                    return;
                };
                event.prevent_default();
                if let Err(_err) = nav.route_to(&path) {
                    #[cfg(feature = "tracing")]
                    tracing::error!(error = %_err, path = path.as_str(), "anchor navigation failed");
                }
            }),
        );
        Self {
            root,
            listener: Cell::new(Some(id)),
        }
    }

    /// Removes the listener; later clicks keep their native behavior.
    pub fn uninstall(&self) {
        if let Some(id) = self.listener.take() {
            self.root.remove_listener(id);
        }
    }
}

impl Drop for AnchorInterceptor {
    fn drop(&mut self) {
        self.uninstall();
    }
}

/// Path a click should be routed to, or `None` to leave the click alone.
///
/// The opt-in attribute's value wins when non-empty so an anchor can route
/// somewhere other than its href; otherwise the href is the target.
fn intercept_target(event: &InputEvent) -> Option<String> {
    if event.kind != InputKind::Click || !event.modifiers.is_empty() {
        return None;
    }
    let anchor = event.anchor.as_ref()?;
    if anchor.external {
        return None;
    }
    let route = anchor.route.as_ref()?;
    if !route.is_empty() {
        return Some(route.clone());
    }
    anchor.href.clone().filter(|href| !href.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockElement, RecordingNavigator, anchor_click};
    use vantage_core::{Anchor, ClickModifiers};

    #[test]
    fn claims_opted_in_internal_anchors() {
        let root = MockElement::shared();
        let nav = RecordingNavigator::shared();
        let _interceptor = AnchorInterceptor::install(root.clone(), nav.clone());

        let click = anchor_click("/about");
        root.fire(&click);
        assert_eq!(nav.paths(), ["/about"]);
        assert!(click.default_prevented());
    }

    #[test]
    fn attribute_value_overrides_the_href() {
        let root = MockElement::shared();
        let nav = RecordingNavigator::shared();
        let _interceptor = AnchorInterceptor::install(root.clone(), nav.clone());

        let anchor = Anchor {
            href: Some("/fallback".to_owned()),
            route: Some("/actual".to_owned()),
            external: false,
        };
        root.fire(&InputEvent::click(Some(anchor), ClickModifiers::empty()));
        assert_eq!(nav.paths(), ["/actual"]);
    }

    #[test]
    fn leaves_unclaimed_clicks_alone() {
        let root = MockElement::shared();
        let nav = RecordingNavigator::shared();
        let _interceptor = AnchorInterceptor::install(root.clone(), nav.clone());

        // No anchor at all.
        let plain = InputEvent::click(None, ClickModifiers::empty());
        root.fire(&plain);

        // Anchor without the opt-in attribute.
        let unopted = InputEvent::click(
            Some(Anchor {
                href: Some("/about".to_owned()),
                route: None,
                external: false,
            }),
            ClickModifiers::empty(),
        );
        root.fire(&unopted);

        // External link.
        let external = InputEvent::click(
            Some(Anchor {
                href: Some("https://elsewhere.example".to_owned()),
                route: Some(String::new()),
                external: true,
            }),
            ClickModifiers::empty(),
        );
        root.fire(&external);

        // Modified click keeps its open-in-new-tab meaning.
        let modified = InputEvent::click(
            Some(Anchor {
                href: Some("/about".to_owned()),
                route: Some(String::new()),
                external: false,
            }),
            ClickModifiers::CTRL,
        );
        root.fire(&modified);

        assert!(nav.paths().is_empty());
        for event in [&plain, &unopted, &external, &modified] {
            assert!(!event.default_prevented());
        }
    }

    #[test]
    fn uninstall_stops_interception() {
        let root = MockElement::shared();
        let nav = RecordingNavigator::shared();
        let interceptor = AnchorInterceptor::install(root.clone(), nav.clone());

        interceptor.uninstall();
        assert_eq!(root.listener_count(), 0);

        root.fire(&anchor_click("/about"));
        assert!(nav.paths().is_empty());
    }

    #[test]
    fn drop_removes_the_listener() {
        let root = MockElement::shared();
        let nav = RecordingNavigator::shared();
        let interceptor = AnchorInterceptor::install(root.clone(), nav);
        assert_eq!(root.listener_count(), 1);
        drop(interceptor);
        assert_eq!(root.listener_count(), 0);
    }
}
