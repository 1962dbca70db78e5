//! State containers shared by every page view.
//!
//! Each store keeps its state behind a lock and only hands out clones, so a
//! reader never observes half of an operation's updates.

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

pub mod guest;
pub mod wedding;

pub use guest::GuestStore;
pub use wedding::{WeddingState, WeddingStore};

/// State with a loading/error pair
pub(crate) trait Tracked {
    fn begin(&mut self);
    fn finish(&mut self);
}

pub(crate) fn write<S>(lock: &RwLock<S>) -> RwLockWriteGuard<'_, S> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<S: Clone>(lock: &RwLock<S>) -> S {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Marks an operation as loading for as long as it is alive.
///
/// `finish` also runs when the operation's future is dropped mid-flight.
pub(crate) struct InFlight<'a, S: Tracked> {
    state: &'a RwLock<S>,
}

impl<'a, S: Tracked> InFlight<'a, S> {
    pub(crate) fn start(state: &'a RwLock<S>) -> Self {
        write(state).begin();
        Self { state }
    }
}

impl<S: Tracked> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        write(self.state).finish();
    }
}
