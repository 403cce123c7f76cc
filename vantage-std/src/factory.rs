//! Factory adapter binding collaborators ahead of activation.

use std::rc::Rc;
use vantage_core::{ElementRef, NavigatorRef, ViewError, ViewFactory, ViewRef};

/// Adapts a view constructor into a [`ViewFactory`] by binding its
/// auxiliary collaborators now and leaving the activation arguments to the
/// router.
///
/// Registration time knows which bus, templates, and controllers a screen
/// wants; the router only ever supplies the element and a navigator. This
/// adapter is the bridge: `aux` is captured once and cloned into every
/// activation, so each activation gets its own handles and a completely
/// fresh view.
///
/// ```rust,ignore
/// let factory = view_factory(deps.clone(), |root, nav, deps| {
///     Ok(MenuScreen::new(root, nav, deps) as ViewRef)
/// });
/// router.add_route("/menu", factory)?;
/// ```
pub fn view_factory<A, F>(aux: A, construct: F) -> ViewFactory
where
    A: Clone + 'static,
    F: Fn(ElementRef, NavigatorRef, A) -> Result<ViewRef, ViewError> + 'static,
{
    Rc::new(move |root, nav| construct(root, nav, aux.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockElement, RecordingNavigator};
    use std::cell::Cell;
    use vantage_core::View;

    struct Inert;

    impl View for Inert {
        fn init(self: Rc<Self>) -> Result<(), ViewError> {
            Ok(())
        }
        fn deinit(&self) {}
    }

    #[test]
    fn every_activation_builds_a_fresh_view_with_bound_aux() {
        let calls = Rc::new(Cell::new(0u32));
        let factory = view_factory(
            (Rc::new("menu".to_owned()), calls.clone()),
            |_root, _nav, (tag, calls): (Rc<String>, Rc<Cell<u32>>)| {
                assert_eq!(*tag, "menu");
                calls.set(calls.get() + 1);
                Ok(Rc::new(Inert) as ViewRef)
            },
        );

        let root = MockElement::shared();
        let nav = RecordingNavigator::shared();
        let a = factory(root.clone(), nav.clone()).unwrap();
        let b = factory(root, nav).unwrap();
        assert_eq!(calls.get(), 2);
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn construction_errors_pass_through() {
        let factory = view_factory((), |_root, _nav, ()| {
            Err::<ViewRef, _>(ViewError::Construction("missing template".to_owned()))
        });
        let err = factory(MockElement::shared(), RecordingNavigator::shared()).unwrap_err();
        assert!(matches!(err, ViewError::Construction(message) if message == "missing template"));
    }
}
