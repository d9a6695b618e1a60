#![allow(unused_imports)]
cfg_loom! {
    pub(crate) use loom::sync::{Arc, Condvar, Mutex, MutexGuard};
}

cfg_not_loom! {
    pub(crate) use std::sync::{Arc, Condvar, Mutex, MutexGuard};
}

pub(crate) use std::sync::LockResult;

/// Takes the guard out of a [`LockResult`], ignoring poison.
///
/// Worker panics are re-raised at join, not through the lock.
#[inline]
pub(crate) fn unpoison<G>(result: LockResult<G>) -> G {
    match result {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}
