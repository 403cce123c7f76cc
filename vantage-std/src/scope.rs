//! Per-activation resource tracking for views.

use std::cell::{Cell, RefCell};
use vantage_core::{
    BusRef, ElementRef, EventHandler, InputHandler, InputKind, ListenerId, Phase, Subscription,
    ViewError,
};

/// Tracks everything one view activation acquires, and releases it all on
/// [`teardown`](Self::teardown).
///
/// A screen owns one scope per construction. `begin` gates the lifecycle
/// (a view initializes at most once), `subscribe` and `listen` acquire
/// through the scope so nothing escapes bookkeeping, and `teardown`
/// releases every subscription and listener, blanks the element, and
/// retires the scope. Teardown is idempotent and infallible, so a view's
/// `deinit` can always delegate to it, even after a failed `init`.
pub struct ViewScope {
    root: ElementRef,
    bus: BusRef,
    phase: Cell<Phase>,
    subs: RefCell<Vec<Subscription>>,
    listeners: RefCell<Vec<ListenerId>>,
}

impl ViewScope {
    /// Creates a scope over the element the view will own.
    pub fn new(root: ElementRef, bus: BusRef) -> Self {
        Self {
            root,
            bus,
            phase: Cell::new(Phase::Constructed),
            subs: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// The element this scope paints and listens on.
    pub fn root(&self) -> &ElementRef {
        &self.root
    }

    /// The bus this scope subscribes on.
    pub fn bus(&self) -> &BusRef {
        &self.bus
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// True while initialized and not yet retired.
    pub fn is_live(&self) -> bool {
        self.phase.get() == Phase::Initialized
    }

    /// Moves the scope from constructed to initialized.
    ///
    /// Errors when called twice or after retirement; this is what makes a
    /// view's `init` single-shot.
    pub fn begin(&self) -> Result<(), ViewError> {
        match self.phase.get() {
            Phase::Constructed => {
                self.phase.set(Phase::Initialized);
                Ok(())
            }
            Phase::Initialized => Err(ViewError::AlreadyInitialized),
            Phase::Deinitialized => Err(ViewError::Deinitialized),
        }
    }

    /// Subscribes on the bus and tracks the token for teardown.
    ///
    /// Ignored once the scope is retired: a late callback racing teardown
    /// cannot re-acquire.
    pub fn subscribe(&self, topic: &str, handler: EventHandler) {
        if self.phase.get() == Phase::Deinitialized {
            return;
        }
        let sub = self.bus.subscribe(topic, handler);
        self.subs.borrow_mut().push(sub);
    }

    /// Registers an input listener on the root and tracks it for teardown.
    ///
    /// Ignored once the scope is retired.
    pub fn listen(&self, kind: InputKind, handler: InputHandler) {
        if self.phase.get() == Phase::Deinitialized {
            return;
        }
        let id = self.root.add_listener(kind, handler);
        self.listeners.borrow_mut().push(id);
    }

    /// Number of live bus subscriptions held by this scope.
    pub fn subscription_count(&self) -> usize {
        self.subs.borrow().len()
    }

    /// Number of live input listeners held by this scope.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Releases every tracked acquisition, blanks the element, and retires
    /// the scope. Calls after the first are no-ops.
    pub fn teardown(&self) {
        if self.phase.get() == Phase::Deinitialized {
            return;
        }
        self.phase.set(Phase::Deinitialized);
        for sub in self.subs.borrow_mut().drain(..) {
            self.bus.unsubscribe(sub);
        }
        for id in self.listeners.borrow_mut().drain(..) {
            self.root.remove_listener(id);
        }
        self.root.set_html("");
    }
}
