//! Concurrent fan-out data structures.
//!
//! The [`fanout`] module provides an unbounded stream buffer where a single
//! producer appends records and a fixed set of job workers each observe every
//! record in enqueue order, with coordinated reclamation of drained records.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use ventaglio::fanout::Stream;
//!
//! let seen = Arc::new(AtomicU64::new(0));
//!
//! let stream = Stream::init(1).unwrap();
//! let sink = seen.clone();
//! stream
//!     .register_job(1, move |value: &u64| {
//!         sink.fetch_add(*value, Ordering::Relaxed);
//!     })
//!     .unwrap();
//!
//! for value in 1..=10u64 {
//!     stream.insert(value).unwrap();
//! }
//! stream.shutdown().unwrap();
//!
//! assert_eq!(seen.load(Ordering::Relaxed), 55);
//! ```

pub mod fanout;
