//! A small observer-pattern state layer.
//!
//! A [`Store`] holds a value and notifies its subscribers whenever that value
//! changes. An [`Effect`] is a computation subscribed to a declared set of
//! stores; it runs once when started and again on every change of any of
//! them. Dropping a [`Subscription`] or an [`Effect`] unregisters it.

use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct StoreInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

/// A shared, observable value. Clones share the same value.
pub struct Store<T> {
    inner: Rc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value. Subscribers are notified only if it changed.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    /// Calls `f` with every future value until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(f)));

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    // No borrow is held while subscribers run, so they may read or write
    // this store.
    fn notify(&self) {
        let value = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&value);
        }
    }
}

/// Keeps a subscriber registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A computation that re-runs whenever one of its dependencies changes.
///
/// ```ignore
/// let effect = Effect::new(move || recompute())
///     .depends_on(&amount)
///     .depends_on(&currency)
///     .start();
/// ```
#[must_use = "dropping an Effect stops it"]
pub struct Effect {
    run: Rc<dyn Fn()>,
    subscriptions: Vec<Subscription>,
}

impl Effect {
    pub fn new(run: impl Fn() + 'static) -> Self {
        Self {
            run: Rc::new(run),
            subscriptions: Vec::new(),
        }
    }

    /// Declares `store` as a dependency.
    pub fn depends_on<T: Clone + PartialEq + 'static>(mut self, store: &Store<T>) -> Self {
        let run = self.run.clone();
        self.subscriptions.push(store.subscribe(move |_| run()));
        self
    }

    /// Runs the computation once and keeps it subscribed.
    pub fn start(self) -> Self {
        (self.run)();
        self
    }
}

/// Liveness of an owning context.
///
/// Work that may finish after its owner is gone (network responses, for
/// instance) checks the scope before publishing anything.
#[derive(Clone, Debug)]
pub struct Scope {
    alive: Rc<Cell<bool>>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn close(&self) {
        self.alive.set(false);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn set_notifies_only_on_change() {
        let store = Store::new(1);
        let (seen, f) = recorder::<i32>();
        let _sub = store.subscribe(f);

        assert!(store.set(2));
        assert!(!store.set(2));
        assert!(store.set(3));

        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = Store::new("a".to_string());
        let (seen, f) = recorder::<String>();
        let sub = store.subscribe(f);
        assert_eq!(store.subscriber_count(), 1);

        drop(sub);
        store.set("b".to_string());

        assert_eq!(store.subscriber_count(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn subscriber_may_write_back_to_its_store() {
        let store = Store::new(0);
        let inner = store.clone();
        let _sub = store.subscribe(move |v| {
            if *v < 3 {
                inner.set(v + 1);
            }
        });

        store.set(1);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn effect_runs_on_start_and_on_each_dependency_change() {
        let a = Store::new(1);
        let b = Store::new(10);
        let sums = Rc::new(RefCell::new(Vec::new()));

        let (ra, rb, out) = (a.clone(), b.clone(), sums.clone());
        let effect = Effect::new(move || out.borrow_mut().push(ra.get() + rb.get()))
            .depends_on(&a)
            .depends_on(&b)
            .start();

        a.set(2);
        b.set(20);
        b.set(20);
        assert_eq!(*sums.borrow(), vec![11, 12, 22]);

        drop(effect);
        a.set(5);
        assert_eq!(sums.borrow().len(), 3);
    }

    #[test]
    fn scope_closes_for_every_clone() {
        let scope = Scope::new();
        let held = scope.clone();
        assert!(held.is_alive());

        scope.close();
        assert!(!held.is_alive());
    }
}
