//! Deferred work slot for moving timer expiries into task context.
//!
//! A depth-1 mailbox built on `critical-section` and `heapless::Deque`.
//! The interrupt side only ever posts; the owning task drains it and runs
//! the flash transition with ordinary, possibly blocking, calls.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::timer::TimerExpiry;

/// Work item delivered to the indicator's task context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Work {
    /// The flash timer elapsed; advance the sequence
    TimerExpired,
}

/// Single pending work item per indicator.
///
/// Safe to share between interrupt and thread context via critical sections,
/// so it can live in a `static`:
///
/// ```ignore
/// static SLOT: WorkSlot = WorkSlot::new();
/// ```
pub struct WorkSlot {
    inner: Mutex<RefCell<Deque<Work, 1>>>,
}

impl WorkSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get the interrupt-side handle that posts timer expiries into this slot
    pub const fn expiry(&self) -> TimerExpiry<'_> {
        TimerExpiry::new(self)
    }

    /// Post a work item.
    ///
    /// Returns `false` when an item is already pending; the new one is
    /// coalesced into it.
    pub fn post(&self, work: Work) -> bool {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(work).is_ok()
        })
    }

    /// Take the pending work item, if any
    pub fn take(&self) -> Option<Work> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Discard the pending work item, returning whether there was one
    pub fn discard(&self) -> bool {
        self.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| !self.inner.borrow(cs).borrow().is_empty())
    }
}

impl Default for WorkSlot {
    fn default() -> Self {
        Self::new()
    }
}
