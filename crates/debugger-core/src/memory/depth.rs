//! Reentrancy counter for accesses the debugger performs on its own behalf.
//!
//! Bus implementations that want to suppress side effects (open-bus latches,
//! FIFO pops, tracing) during debugger reads hold a clone of the session's
//! [`DebugDepth`] and check [`DebugDepth::is_active`].

use std::cell::Cell;
use std::rc::Rc;

/// Shared nesting counter of debugger-initiated bus accesses.
#[derive(Debug, Clone, Default)]
pub struct DebugDepth {
    depth: Rc<Cell<u32>>,
}

impl DebugDepth {
    /// Creates a counter at depth zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    #[must_use]
    pub fn get(&self) -> u32 {
        self.depth.get()
    }

    /// Returns `true` while at least one debugger access is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.get() > 0
    }

    /// Increments the depth until the returned scope is dropped.
    #[must_use = "the depth is released as soon as the scope is dropped"]
    pub fn enter(&self) -> DebugScope {
        self.depth.set(self.depth.get().saturating_add(1));
        DebugScope {
            depth: Rc::clone(&self.depth),
        }
    }
}

/// Guard returned by [`DebugDepth::enter`].
#[derive(Debug)]
pub struct DebugScope {
    depth: Rc<Cell<u32>>,
}

impl Drop for DebugScope {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
