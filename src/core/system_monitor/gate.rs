//! Multi-reader / single-writer gate between the samplers and the renderer.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

/// Shared handle to state that samplers write and the renderer reads.
///
/// Any number of readers may hold the gate at once. A writer excludes every
/// reader and every other writer, so a reader never observes a half-applied
/// update.
pub struct RenderGate<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for RenderGate<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for RenderGate<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> RenderGate<T> {
    pub fn new(state: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Run `f` with write-intent held.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Run `f` with read-intent held.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Hold read-intent until the guard is dropped (e.g. for a whole frame).
    pub fn read_guard(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }
}
