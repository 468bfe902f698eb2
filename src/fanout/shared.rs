use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::thread::JoinHandle;

use crossbeam_utils::CachePadded;
use parking_lot::{Mutex, RwLock};

use crate::fanout::JobId;
use crate::fanout::node::Node;
use crate::fanout::signal::Signal;

/// Both ends of the list, guarded together: `head` is `None` iff `tail` is.
pub(super) struct Ends<T> {
    pub(super) head: Option<Arc<Node<T>>>,
    pub(super) tail: Option<Arc<Node<T>>>,
}

// The reclaimer empties the list before it exits, so this only ever walks a
// populated chain if the stream is torn down abnormally. Severing the links
// one by one keeps the node drops from recursing through `next` and
// exhausting the stack on a long backlog.
impl<T> Drop for Ends<T> {
    fn drop(&mut self) {
        self.tail.take();
        let mut cursor = self.head.take();
        while let Some(node) = cursor {
            cursor = node.take_next();
        }
    }
}

/// State shared between the producer handle, the job workers and the
/// reclaimer.
///
/// Lock order, strict: `ends` → `signal` → a node's successor lock. The
/// append path acquires the successor lock and the signal lock one after the
/// other under `ends`, never nested in each other; waiters acquire the
/// signal lock only while holding nothing else.
pub(super) struct Shared<T> {
    /// Head and tail of the append-only list.
    pub(super) ends: RwLock<Ends<T>>,
    /// Eventcount broadcast on every append.
    pub(super) signal: Signal,
    /// Jobs declared at init; also each record node's visit countdown.
    pub(super) jobs: usize,
    /// Workers spawned so far, joined by the reclaimer at end-of-stream.
    pub(super) workers: Mutex<Vec<(JobId, JoinHandle<()>)>>,
    /// Nodes appended so far; the source of sequence numbers.
    appended: CachePadded<AtomicU64>,
    /// Nodes currently linked in the list.
    live: CachePadded<AtomicUsize>,
    /// Nodes destroyed by the reclaimer so far.
    reclaimed: CachePadded<AtomicU64>,
    /// Set on the first insert; freezes job registration.
    started: AtomicBool,
    /// Set when the end-of-stream marker is appended.
    finished: AtomicBool,
}

impl<T> Shared<T> {
    pub(super) fn new(jobs: usize) -> Self {
        Self {
            ends: RwLock::new(Ends {
                head: None,
                tail: None,
            }),
            signal: Signal::new(),
            jobs,
            workers: Mutex::new(Vec::with_capacity(jobs)),
            appended: CachePadded::new(AtomicU64::new(0)),
            live: CachePadded::new(AtomicUsize::new(0)),
            reclaimed: CachePadded::new(AtomicU64::new(0)),
            started: AtomicBool::new(false),
            finished: AtomicBool::new(false),
        }
    }

    /// Appends a fully constructed node at the tail and broadcasts the
    /// new-node signal while still holding the head-tail lock, so the node
    /// is never observable before its broadcast.
    pub(super) fn append(&self, node: Arc<Node<T>>) {
        let mut ends = self.ends.write();
        match ends.tail.take() {
            None => ends.head = Some(node.clone()),
            Some(tail) => tail.link(node.clone()),
        }
        ends.tail = Some(node);
        self.live.fetch_add(1, Ordering::Relaxed);
        self.signal.notify();
    }

    /// Blocks until the list has a head, for tasks started on an empty
    /// stream.
    pub(super) fn wait_head(&self) -> Arc<Node<T>> {
        loop {
            let seen = self.signal.snapshot();
            if let Some(head) = self.ends.read().head.clone() {
                return head;
            }
            self.signal.wait_past(seen);
        }
    }

    /// Blocks until `node` has a successor.
    pub(super) fn wait_next(&self, node: &Node<T>) -> Arc<Node<T>> {
        loop {
            let seen = self.signal.snapshot();
            if let Some(next) = node.next() {
                return next;
            }
            self.signal.wait_past(seen);
        }
    }

    /// Replaces the head with the reclaimed node's successor.
    pub(super) fn advance_head(&self, next: Arc<Node<T>>) {
        self.ends.write().head = Some(next);
        self.note_reclaimed();
    }

    /// Empties the list once the end-of-stream marker is torn down.
    pub(super) fn clear(&self) {
        let mut ends = self.ends.write();
        ends.head = None;
        ends.tail = None;
        drop(ends);
        self.note_reclaimed();
    }

    fn note_reclaimed(&self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        self.reclaimed.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn next_seq(&self) -> u64 {
        self.appended.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(super) fn registered(&self) -> usize {
        self.workers.lock().len()
    }

    pub(super) fn len(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    pub(super) fn reclaimed(&self) -> u64 {
        self.reclaimed.load(Ordering::Relaxed)
    }

    pub(super) fn started(&self) -> bool {
        self.started.load(Ordering::Relaxed)
    }

    pub(super) fn set_started(&self) {
        self.started.store(true, Ordering::Release);
    }

    pub(super) fn finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    /// Marks the stream finished; returns `false` if it already was.
    pub(super) fn set_finished(&self) -> bool {
        !self.finished.swap(true, Ordering::Release)
    }
}
