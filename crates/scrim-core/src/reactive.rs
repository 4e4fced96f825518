#![forbid(unsafe_code)]

//! Observable value cell with change notification and version tracking.
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). When the value changes (determined by `PartialEq`),
//! all live subscribers are notified in registration order. The modal widget
//! uses one of these to fan its phase transitions out to the overlay
//! coordinator and to consumer observers.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing mutation.
//! 2. `set(v)` where `v == current` is a no-op.
//! 3. Subscribers are notified in registration order.
//! 4. Dead subscribers (dropped [`Subscription`] guards) are pruned lazily
//!    on the next notification.
//!
//! # Failure Modes
//!
//! Notification runs after the cell's borrow is released, so a subscriber
//! may call `set()` on the same cell without panicking. A subscriber graph
//! that mutates in a cycle will loop, not deadlock; keep reactions acyclic.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Subscribers stored as weak references. Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state;
/// both handles see the same value and share subscribers.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    ///
    /// The initial version is 0 and no subscribers are registered.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value. If it differs from the current value (by
    /// `PartialEq`), the version is incremented and all live subscribers are
    /// notified. Safe to call from within a subscriber callback.
    pub fn set(&self, value: T) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
            true
        };
        if changed {
            self.notify();
        }
    }

    /// Subscribe to value changes. The callback is invoked with a reference
    /// to the new value each time it changes.
    ///
    /// Returns a [`Subscription`] guard. Dropping the guard unsubscribes the
    /// callback; it will not be invoked after drop, though its slot lingers
    /// in the subscriber list until the next notification prunes it.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Current version number. Increments by 1 on each value-changing
    /// mutation. Useful for dirty-checking.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers (including dead ones not yet pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Notify live subscribers and prune dead ones.
    fn notify(&self) {
        // Collect live callbacks first so the borrow is not held during calls.
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(subscribers = callbacks.len(), "observable notify");

        // Clone the value once for all callbacks.
        let value = self.inner.borrow().value.clone();
        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the guard drops the strong reference to the callback, so the
/// `Weak` held by the observable fails to upgrade on the next notification.
pub struct Subscription {
    /// Type-erased strong reference keeping the callback `Rc` alive.
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
