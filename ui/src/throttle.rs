//! Rate-limits how often a fast-changing value reaches its dependents.

use crate::compat;
use crate::compat::Instant;
use crate::compat::TaskGuard;
use crate::reactive::Store;
use crate::reactive::Subscription;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

struct ThrottleState {
    last_emitted: Instant,
    pending: Option<TaskGuard>,
}

/// A read-only projection of an input [`Store`] that changes at most once
/// per `interval`.
///
/// A change arriving at least `interval` after the last emission goes
/// through at once. Otherwise a single trailing emission is scheduled for
/// the rest of the interval; newer changes replace it, so only the latest
/// value is ever emitted. Dropping the throttle cancels a pending emission.
pub struct Throttle<T> {
    output: Store<T>,
    state: Rc<RefCell<ThrottleState>>,
    _input: Subscription,
}

impl<T: Clone + PartialEq + 'static> Throttle<T> {
    pub fn new(input: &Store<T>, interval: Duration) -> Self {
        let output = Store::new(input.get());
        let state = Rc::new(RefCell::new(ThrottleState {
            last_emitted: compat::now(),
            pending: None,
        }));

        let subscription = {
            let output = output.clone();
            let state = Rc::downgrade(&state);
            input.subscribe(move |value| {
                if let Some(state) = state.upgrade() {
                    Self::on_input(&state, &output, value.clone(), interval);
                }
            })
        };

        Self {
            output,
            state,
            _input: subscription,
        }
    }

    /// The throttled value.
    pub fn output(&self) -> &Store<T> {
        &self.output
    }

    pub fn get(&self) -> T {
        self.output.get()
    }

    pub fn has_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    fn on_input(state: &Rc<RefCell<ThrottleState>>, output: &Store<T>, value: T, interval: Duration) {
        let elapsed = state.borrow().last_emitted.elapsed();

        if elapsed >= interval {
            {
                let mut state = state.borrow_mut();
                state.pending = None;
                state.last_emitted = compat::now();
            }
            output.set(value);
            return;
        }

        let remaining = interval - elapsed;
        let weak = Rc::downgrade(state);
        let output = output.clone();
        let guard = compat::spawn(async move {
            compat::sleep(remaining).await;
            if let Some(state) = weak.upgrade() {
                {
                    let mut state = state.borrow_mut();
                    state.last_emitted = compat::now();
                    state.pending = None;
                }
                output.set(value);
            }
        });

        // Replacing the guard cancels the previously scheduled emission.
        state.borrow_mut().pending = Some(guard);
    }
}
