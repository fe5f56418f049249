// src/lock.rs

//! Advisory, non-blocking gate around the display descriptor.
//!
//! Contention is reported immediately; nobody ever waits. `acquire`/`release`
//! exist for call sites that bracket a transmission by hand, `guard` is the
//! scoped form that releases on every exit path.

use crate::error::{PanelError, PanelResult};
use log::trace;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct AccessSerializer {
    locked: AtomicBool,
}

impl AccessSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the resource locked. Fails without side effects if it already is.
    pub fn acquire(&self) -> PanelResult<()> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| trace!("AccessSerializer: acquired"))
            .map_err(|_| PanelError::AlreadyLocked)
    }

    /// Clears the flag unconditionally.
    pub fn release(&self) {
        self.locked.store(false, Ordering::Release);
        trace!("AccessSerializer: released");
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    pub fn guard(&self) -> PanelResult<SerializerGuard<'_>> {
        self.acquire()?;
        Ok(SerializerGuard { owner: self })
    }
}

/// Holds the gate until dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SerializerGuard<'a> {
    owner: &'a AccessSerializer,
}

impl Drop for SerializerGuard<'_> {
    fn drop(&mut self) {
        self.owner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_and_keeps_lock() {
        let gate = AccessSerializer::new();
        assert!(gate.acquire().is_ok());
        assert!(matches!(gate.acquire(), Err(PanelError::AlreadyLocked)));
        assert!(gate.is_locked());
    }

    #[test]
    fn release_then_acquire_succeeds() {
        let gate = AccessSerializer::new();
        gate.acquire().unwrap();
        gate.release();
        assert!(!gate.is_locked());
        assert!(gate.acquire().is_ok());
    }

    #[test]
    fn release_is_unconditional() {
        let gate = AccessSerializer::new();
        gate.release();
        gate.release();
        assert!(!gate.is_locked());
    }

    #[test]
    fn guard_releases_on_early_return() {
        fn transmit(gate: &AccessSerializer, fail: bool) -> PanelResult<()> {
            let _guard = gate.guard()?;
            if fail {
                return Err(PanelError::AlreadyLocked);
            }
            Ok(())
        }

        let gate = AccessSerializer::new();
        assert!(transmit(&gate, true).is_err());
        assert!(!gate.is_locked());
        assert!(transmit(&gate, false).is_ok());
        assert!(!gate.is_locked());
    }

    #[test]
    fn guard_fails_while_held() {
        let gate = AccessSerializer::new();
        let held = gate.guard().unwrap();
        assert!(gate.guard().is_err());
        drop(held);
        assert!(gate.guard().is_ok());
    }
}
