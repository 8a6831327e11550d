//! Platform shims for timers, task spawning and the monotonic clock.
//!
//! Everything runs on the current thread: the browser build on the JS event
//! loop, native builds (tests) on a tokio `LocalSet`.

use futures::future::AbortHandle;
use std::future::Future;
use std::time::Duration;

/// The shortest period an `Interval` ticks at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

/// Owns a spawned task. Dropping the guard cancels the task at its next
/// suspension point.
#[derive(Debug)]
pub struct TaskGuard {
    handle: AbortHandle,
}

impl TaskGuard {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns `fut` on the current thread and returns the guard that cancels it.
pub fn spawn<F>(fut: F) -> TaskGuard
where
    F: Future<Output = ()> + 'static,
{
    let (task, handle) = futures::future::abortable(fut);
    spawn_local(async move {
        let _ = task.await;
    });
    TaskGuard { handle }
}

/// Spawns `fut` without keeping a handle. It runs to completion even if
/// its owner goes away.
pub fn spawn_detached<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    spawn_local(fut);
}

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use std::future::Future;
    use std::time::Duration;

    pub type Instant = web_time::Instant;

    pub mod interval {
        use std::time::Duration;
        use tokio::sync::mpsc;

        /// Ticks every `duration`; the first tick arrives one period after
        /// creation. Periods shorter than [`super::super::MIN_PERIOD`] are
        /// raised to it.
        pub struct Interval {
            inner: Option<gloo_timers::callback::Interval>,
            rx: mpsc::UnboundedReceiver<()>,
        }

        impl Interval {
            pub fn new(duration: Duration) -> Self {
                let (tx, rx) = mpsc::unbounded_channel();
                let millis = duration.max(super::super::MIN_PERIOD).as_millis();
                let millis = u32::try_from(millis).unwrap_or(u32::MAX);
                let gloo_interval = gloo_timers::callback::Interval::new(millis, move || {
                    let _ = tx.send(());
                });

                Self {
                    inner: Some(gloo_interval),
                    rx,
                }
            }

            pub async fn tick(&mut self) {
                let _ = self.rx.recv().await;
            }
        }

        impl Drop for Interval {
            fn drop(&mut self) {
                if let Some(inner) = self.inner.take() {
                    inner.cancel();
                }
            }
        }
    }

    pub fn now() -> Instant {
        Instant::now()
    }

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    pub fn spawn_local<F>(fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(fut);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use std::future::Future;
    use std::time::Duration;

    /// tokio's clock, so paused-time tests see the same time as the timers.
    pub type Instant = tokio::time::Instant;

    pub mod interval {
        use tokio::time::{self, Duration, MissedTickBehavior};

        /// Ticks every `duration`; the first tick arrives one period after
        /// creation. Periods shorter than [`super::super::MIN_PERIOD`] are
        /// raised to it.
        pub struct Interval {
            inner: tokio::time::Interval,
        }

        impl Interval {
            pub fn new(duration: Duration) -> Self {
                let duration = duration.max(super::super::MIN_PERIOD);
                let start = time::Instant::now() + duration;
                let mut interval = time::interval_at(start, duration);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Self { inner: interval }
            }

            pub async fn tick(&mut self) {
                self.inner.tick().await;
            }
        }
    }

    pub fn now() -> Instant {
        Instant::now()
    }

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Must be called from within a `tokio::task::LocalSet`.
    pub fn spawn_local<F>(fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        tokio::task::spawn_local(fut);
    }
}
