// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::ExecutorError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Contract-wide lock over the mutating entry points. A second entry while a
/// scope is alive fails fast instead of queueing.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    locked: AtomicBool,
}

impl ReentrancyGuard {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    pub fn enter(&self) -> Result<GuardScope<'_>, ExecutorError> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExecutorError::Reentrant)?;
        Ok(GuardScope { guard: self })
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// Held for the lifetime of one guarded call; unlocks on drop, error paths included.
#[must_use]
pub struct GuardScope<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardScope<'_> {
    fn drop(&mut self) {
        self.guard.locked.store(false, Ordering::Release);
    }
}
