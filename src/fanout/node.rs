use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex, RwLock};

use crate::fanout::JobId;

/// One-shot reclaim gate, opened when every worker has moved past the node
/// (or observed the end-of-stream marker on it) and consumed by the
/// reclaimer.
///
/// Opening is sticky and idempotent: several workers may open the gate for
/// the same end-of-stream node and a late waiter still observes it open.
pub(super) struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    fn new(open: bool) -> Self {
        Self {
            open: Mutex::new(open),
            cond: Condvar::new(),
        }
    }

    pub(super) fn open(&self) {
        let mut open = self.open.lock();
        if !*open {
            *open = true;
            self.cond.notify_all();
        }
    }

    pub(super) fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cond.wait(&mut open);
        }
    }

    #[cfg(test)]
    pub(super) fn is_open(&self) -> bool {
        *self.open.lock()
    }
}

/// One cell of the append-only list.
///
/// The successor link is the only field mutated after publication; the visit
/// bookkeeping is atomic and the rest is fixed at construction.
pub(super) struct Node<T> {
    /// Successor link, `None` while this node is the tail. Written once by
    /// the producer under the write lock, read by workers and the reclaimer.
    next: RwLock<Option<Arc<Node<T>>>>,
    /// Record carried by the node; `None` only on the end-of-stream marker.
    payload: Option<T>,
    /// End-of-stream marker flag.
    pub(super) eos: bool,
    /// Position in enqueue order, starting at 1.
    pub(super) seq: u64,
    /// One claim flag per declared job, indexed `job_id - 1`. Only the
    /// worker owning the job id touches its flag, so `Relaxed` suffices.
    visited: Box<[AtomicBool]>,
    /// Workers that have not yet moved past this node.
    remaining: AtomicUsize,
    pub(super) gate: Gate,
}

impl<T> Node<T> {
    pub(super) fn new(payload: T, seq: u64, walkers: usize) -> Arc<Self> {
        Self::build(Some(payload), false, seq, walkers)
    }

    pub(super) fn end_of_stream(seq: u64, walkers: usize) -> Arc<Self> {
        Self::build(None, true, seq, walkers)
    }

    fn build(payload: Option<T>, eos: bool, seq: u64, walkers: usize) -> Arc<Self> {
        Arc::new(Self {
            next: RwLock::new(None),
            payload,
            eos,
            seq,
            visited: (0..walkers).map(|_| AtomicBool::new(false)).collect(),
            remaining: AtomicUsize::new(walkers),
            // With no workers there is nothing to wait for: the node is
            // reclaimable the moment it is published.
            gate: Gate::new(walkers == 0),
        })
    }

    /// Snapshot of the successor link.
    pub(super) fn next(&self) -> Option<Arc<Node<T>>> {
        self.next.read().clone()
    }

    /// Links `next` behind this node. Producer-only, called while this node
    /// is the tail and the head-tail lock is held.
    pub(super) fn link(&self, next: Arc<Node<T>>) {
        let mut slot = self.next.write();
        debug_assert!(slot.is_none(), "tail already has a successor");
        *slot = Some(next);
    }

    /// Severs the successor link, handing it to the caller.
    pub(super) fn take_next(&self) -> Option<Arc<Node<T>>> {
        self.next.write().take()
    }

    /// Claims this job's visit. Returns the record the first time the job
    /// claims the node and `None` on a revisit.
    pub(super) fn claim(&self, job_id: JobId) -> Option<&T> {
        if self.visited[job_id - 1].swap(true, Ordering::Relaxed) {
            return None;
        }
        self.payload.as_ref()
    }

    /// Records that one worker moved past this node toward its successor.
    /// The release half of the `AcqRel` decrement makes the visit visible to
    /// whoever observes the count hit zero and opens the gate.
    pub(super) fn leave(&self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.gate.open();
        }
    }
}
