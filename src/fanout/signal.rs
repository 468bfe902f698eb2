use parking_lot::{Condvar, Mutex};

/// Append eventcount backing the new-node broadcast.
///
/// Waiters cannot hold the broadcast lock while they inspect the list (the
/// head-tail lock is ordered before it), so the predicate re-check required
/// by condition-variable discipline is done through a monotone counter
/// instead:
///
/// 1. [`snapshot()`](Signal::snapshot) the counter,
/// 2. check the predicate (`head` non-null, `next` non-null) under its own
///    lock,
/// 3. if it fails, [`wait_past()`](Signal::wait_past) the snapshot.
///
/// An append between steps 2 and 3 moves the counter past the snapshot, so
/// the wait returns immediately: no lost wakeup.
pub(super) struct Signal {
    appended: Mutex<u64>,
    cond: Condvar,
}

impl Signal {
    pub(super) fn new() -> Self {
        Self {
            appended: Mutex::new(0),
            cond: Condvar::new(),
        }
    }

    /// Current append count, taken before checking a wait predicate.
    pub(super) fn snapshot(&self) -> u64 {
        *self.appended.lock()
    }

    /// Records one append and wakes every waiter. The producer calls this
    /// while still holding the head-tail lock, so a node is never observable
    /// before its broadcast.
    pub(super) fn notify(&self) {
        let mut appended = self.appended.lock();
        *appended += 1;
        self.cond.notify_all();
    }

    /// Blocks until the append count has moved past `seen`.
    pub(super) fn wait_past(&self, seen: u64) {
        let mut appended = self.appended.lock();
        while *appended <= seen {
            self.cond.wait(&mut appended);
        }
    }
}
