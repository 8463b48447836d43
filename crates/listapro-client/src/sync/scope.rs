//! Controller plumbing shared by the list and task controllers:
//! cancellation, observers and the parent-scope change notifier.

use std::cell::RefCell;
use std::rc::Rc;

use tokio_util::sync::CancellationToken;

use super::collection::{CollectionSnapshot, OptimisticCollection};
use crate::domain::Entity;

/// Parent-scope callback fired after every successful mutation
pub type ChangeNotifier = Rc<dyn Fn()>;

/// Receives the collection after every local change
pub type SnapshotListener<T> = Rc<dyn Fn(&CollectionSnapshot<T>)>;

/// Lifetime of a controller. Requests run under child tokens so a response
/// arriving after `dispose` (or after a newer load) is dropped.
pub(crate) struct Scope {
    token: CancellationToken,
    current_load: RefCell<Option<CancellationToken>>,
    notifier: Option<ChangeNotifier>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            current_load: RefCell::new(None),
            notifier: None,
        }
    }

    pub(crate) fn set_notifier(&mut self, notifier: ChangeNotifier) {
        self.notifier = Some(notifier);
    }

    /// Token for a single mutation request
    pub(crate) fn request(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Token for a fetch; cancels whichever fetch was still in flight
    pub(crate) fn begin_load(&self) -> CancellationToken {
        let token = self.token.child_token();
        if let Some(previous) = self.current_load.replace(Some(token.clone())) {
            previous.cancel();
        }
        token
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn dispose(&self) {
        self.token.cancel();
    }

    pub(crate) fn notify(&self) {
        if self.is_disposed() {
            return;
        }
        if let Some(notifier) = &self.notifier {
            notifier();
        }
    }
}

/// An `OptimisticCollection` that reports every change to its listener.
///
/// The `RefCell` borrow never outlives a single `update` call, so it is
/// never held across an await point.
pub(crate) struct Observed<T: Entity> {
    inner: RefCell<OptimisticCollection<T>>,
    listener: Option<SnapshotListener<T>>,
}

impl<T: Entity> Observed<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            inner: RefCell::new(OptimisticCollection::new(items)),
            listener: None,
        }
    }

    pub(crate) fn set_listener(&mut self, listener: SnapshotListener<T>) {
        self.listener = Some(listener);
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&OptimisticCollection<T>) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut OptimisticCollection<T>) -> R) -> R {
        let (result, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner);
            (result, inner.snapshot())
        };
        if let Some(listener) = &self.listener {
            listener(&snapshot);
        }
        result
    }
}
