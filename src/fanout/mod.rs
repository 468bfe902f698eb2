//! Fan-out stream buffer
//!
//! An unbounded, single-producer stream where every registered job observes
//! every record in enqueue order. Records live in an append-only linked
//! list; a dedicated reclaimer task destroys each node exactly once, after
//! the last worker has moved past it.
//!
//! ## How It Works
//!
//!```text
//!  head                                        tail
//!   ↓                                           ↓
//! ┌──────┐     ┌──────┐     ┌──────┐     ┌──────┐
//! │  r1  │ ──► │  r2  │ ──► │  r3  │ ──► │ EOS  │
//! └──────┘     └──────┘     └──────┘     └──────┘
//!    ▲             ▲  ▲
//!    reclaimer    J1  J2      (workers walk head → tail)
//!```
//!
//! - The **producer** appends at the tail and broadcasts a new-node signal.
//! - Each **job worker** walks the list independently, applying its function
//!   to every record once, and sleeps on the signal at the tail.
//! - The **reclaimer** waits on each head node's gate, which opens when every
//!   worker has moved past the node, then advances the head and destroys it.
//! - The **end-of-stream marker** is the final node ever appended; observing
//!   it terminates every worker and, after the reclaimer has joined them all,
//!   the reclaimer itself.
//!
//! ## Synchronization
//!
//! | Primitive | Guards | Who blocks on it |
//! |-----------|--------|------------------|
//! | head-tail lock (rwlock) | `head`/`tail` of the list | producer (write), walkers taking their first node (read) |
//! | append eventcount | new-node broadcast + monotone counter | workers at the tail, reclaimer on an empty list |
//! | node successor lock (rwlock) | the `next` link of one node | producer linking (write), walkers stepping (read) |
//! | node gate (one-shot latch) | node drained / EOS observed | reclaimer only |
//!
//! Lock order, strict: head-tail lock → eventcount lock → successor lock.
//! The visit bookkeeping (per-job claim flags, walker countdown) is atomic
//! and takes no lock at all.
//!
//! ## Example
//!
//!```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use ventaglio::fanout;
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let stream = fanout::stream::<u32>(2).unwrap();
//! for job_id in 1..=2 {
//!     let hits = hits.clone();
//!     stream
//!         .register_job(job_id, move |_: &u32| {
//!             hits.fetch_add(1, Ordering::Relaxed);
//!         })
//!         .unwrap();
//! }
//!
//! stream.insert(7).unwrap();
//! stream.insert(8).unwrap();
//! stream.shutdown().unwrap();
//!
//! // Both jobs saw both records
//! assert_eq!(hits.load(Ordering::Relaxed), 4);
//!```
mod error;
mod node;
mod reclaimer;
mod shared;
mod signal;
mod stream;
mod worker;

pub use error::*;
pub use stream::Stream;

/// Identifier of a registered job. Ids are dense and start at 1.
pub type JobId = usize;

/// Creates a stream declaring `jobs` job workers and spawns its reclaimer.
pub fn stream<T: Send + Sync + 'static>(jobs: usize) -> Result<Stream<T>, InitError> {
    Stream::init(jobs)
}
