use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::fanout::node::Node;
use crate::fanout::shared::Shared;
use crate::fanout::{InitError, InsertError, JobId, RegisterError, ShutdownError};
use crate::fanout::{reclaimer, worker};

/// Producer handle of a fan-out stream buffer.
///
/// Owns the reclaimer task spawned at [`init`](Stream::init) and hands every
/// registered job its own worker task. The handle is single-producer by
/// contract and deliberately neither `Clone` nor `Sync`; it may still be
/// moved to a dedicated producer thread.
///
/// Dropping the handle without calling [`shutdown`](Stream::shutdown)
/// performs the same drain: the end-of-stream marker is appended and the
/// reclaimer is joined.
pub struct Stream<T> {
    shared: Arc<Shared<T>>,
    reclaimer: Option<JoinHandle<()>>,
    _not_clone: PhantomData<Cell<()>>, //marker type to avoid cloning implementations
}

impl<T: Send + Sync + 'static> Stream<T> {
    /// Allocates an empty stream declaring `jobs` job workers and spawns the
    /// reclaimer task.
    pub fn init(jobs: usize) -> Result<Self, InitError> {
        let shared = Arc::new(Shared::new(jobs));
        let reclaimer = thread::Builder::new()
            .name("fanout-reclaimer".into())
            .spawn({
                let shared = shared.clone();
                move || reclaimer::run(shared)
            })
            .map_err(InitError::Spawn)?;
        Ok(Self {
            shared,
            reclaimer: Some(reclaimer),
            _not_clone: PhantomData,
        })
    }

    /// Spawns the worker task for `job_id`, bound to `func`.
    ///
    /// Job ids are dense and start at 1. Every declared job must be
    /// registered before the first [`insert`](Stream::insert); registration
    /// afterwards is rejected.
    pub fn register_job<F>(&self, job_id: JobId, func: F) -> Result<(), RegisterError>
    where
        F: Fn(&T) + Send + 'static,
    {
        if job_id == 0 || job_id > self.shared.jobs {
            return Err(RegisterError::IdOutOfRange {
                job_id,
                declared: self.shared.jobs,
            });
        }

        // Holding the registry lock across the checks keeps the spawn and
        // the bookkeeping consistent.
        let mut workers = self.shared.workers.lock();
        if self.shared.started() || self.shared.finished() {
            return Err(RegisterError::Started);
        }
        if workers.iter().any(|(id, _)| *id == job_id) {
            return Err(RegisterError::AlreadyRegistered(job_id));
        }

        let handle = thread::Builder::new()
            .name(format!("fanout-worker-{job_id}"))
            .spawn({
                let shared = self.shared.clone();
                move || worker::run(shared, job_id, func)
            })
            .map_err(RegisterError::Spawn)?;
        workers.push((job_id, handle));
        Ok(())
    }
}

impl<T> Stream<T> {
    /// Appends `record` at the tail and wakes every waiting task. The
    /// record becomes visible to all workers in enqueue order.
    pub fn insert(&self, record: T) -> Result<(), InsertError> {
        if self.shared.finished() {
            return Err(InsertError::Finished);
        }
        // The registry is frozen by the first insert, so the check is only
        // needed until then.
        if !self.shared.started() {
            let registered = self.shared.registered();
            if registered < self.shared.jobs {
                return Err(InsertError::JobsMissing {
                    registered,
                    declared: self.shared.jobs,
                });
            }
            self.shared.set_started();
        }
        self.shared
            .append(Node::new(record, self.shared.next_seq(), self.shared.jobs));
        Ok(())
    }

    /// Terminates the stream: appends the end-of-stream marker, then joins
    /// the reclaimer, which in turn joins every worker and destroys the
    /// remaining nodes.
    pub fn shutdown(mut self) -> Result<(), ShutdownError> {
        self.close()
    }

    /// Number of declared jobs.
    pub fn jobs(&self) -> usize {
        self.shared.jobs
    }

    /// Approximate number of records currently buffered.
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    /// Returns true if no record is currently buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total nodes destroyed by the reclaimer so far.
    pub fn reclaimed(&self) -> u64 {
        self.shared.reclaimed()
    }

    /// Returns true once the end-of-stream marker has been appended.
    pub fn is_finished(&self) -> bool {
        self.shared.finished()
    }

    /// Appends the end-of-stream marker, once.
    fn insert_eos(&self) {
        if !self.shared.set_finished() {
            return;
        }
        // The marker's gate is opened by workers observing it, so its
        // countdown covers exactly the workers that exist: a declared but
        // never registered job must not keep the stream from draining.
        let walkers = self.shared.registered();
        self.shared
            .append(Node::end_of_stream(self.shared.next_seq(), walkers));
    }

    fn close(&mut self) -> Result<(), ShutdownError> {
        let Some(reclaimer) = self.reclaimer.take() else {
            return Ok(());
        };
        self.insert_eos();
        reclaimer
            .join()
            .map_err(|_| ShutdownError::ReclaimerPanicked)
    }
}

impl<T> Drop for Stream<T> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
