//! Shared "disable text selection" toggle.
//!
//! Every widget on a page writes to the same global style rule. The lock
//! counts holders so that one widget ending its drag does not re-enable
//! selection while another is still dragging.

use parking_lot::Mutex;

#[derive(Debug)]
pub struct SelectionLock {
    holders: Mutex<usize>,
}

impl Default for SelectionLock {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionLock {
    pub const fn new() -> Self {
        Self {
            holders: parking_lot::const_mutex(0),
        }
    }

    /// Register a holder. `suppress` runs only for the first one.
    pub fn acquire(&self, suppress: impl FnOnce()) {
        let mut holders = self.holders.lock();
        if *holders == 0 {
            suppress();
        }
        *holders += 1;
    }

    /// Drop a holder. `restore` runs only when the last one leaves.
    ///
    /// Extra releases are ignored.
    pub fn release(&self, restore: impl FnOnce()) {
        let mut holders = self.holders.lock();
        match *holders {
            0 => {}
            1 => {
                *holders = 0;
                restore();
            }
            _ => *holders -= 1,
        }
    }

    pub fn holders(&self) -> usize {
        *self.holders.lock()
    }

    pub fn is_suppressed(&self) -> bool {
        self.holders() > 0
    }
}
