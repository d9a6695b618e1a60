use std::time::Duration;

cfg_loom! {
    pub(crate) use loom::thread::{spawn, JoinHandle};

    /// Simulated work. loom has no notion of time, so this is only a scheduling point.
    pub(crate) fn pause(delay: Duration) {
        if !delay.is_zero() {
            loom::thread::yield_now();
        }
    }
}

cfg_not_loom! {
    pub(crate) use std::thread::{spawn, JoinHandle};

    /// Simulated work. Must never be called while holding the exchange lock.
    pub(crate) fn pause(delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Joins `handle`, re-raising the worker's panic on the calling thread.
pub(crate) fn join<T>(handle: JoinHandle<T>) -> T {
    match handle.join() {
        Ok(ret) => ret,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}
