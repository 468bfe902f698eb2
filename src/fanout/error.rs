use std::fmt;
use std::io;

use crate::fanout::JobId;

/// Thrown when the stream cannot be brought up.
#[derive(Debug)]
pub enum InitError {
    /// The reclaimer task could not be spawned.
    Spawn(io::Error),
}

/// Thrown on an illegal job registration.
#[derive(Debug)]
pub enum RegisterError {
    /// Job ids are dense and start at 1.
    IdOutOfRange { job_id: JobId, declared: usize },
    /// The id already has a worker bound to it.
    AlreadyRegistered(JobId),
    /// Registration is only legal before the first record is inserted.
    Started,
    /// The worker task could not be spawned.
    Spawn(io::Error),
}

/// Thrown when the stream rejects a new record.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertError {
    /// Not every declared job has a worker yet; the record's visit countdown
    /// could never reach zero.
    JobsMissing { registered: usize, declared: usize },
    /// The end-of-stream marker is already appended.
    Finished,
}

/// Thrown when stream teardown does not complete cleanly.
#[derive(Debug, PartialEq, Eq)]
pub enum ShutdownError {
    /// The reclaimer task panicked before draining the stream.
    ReclaimerPanicked,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to spawn the reclaimer task: {e}"),
        }
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdOutOfRange { job_id, declared } => {
                write!(f, "job id {job_id} outside 1..={declared}")
            }
            Self::AlreadyRegistered(job_id) => write!(f, "job id {job_id} already registered"),
            Self::Started => write!(f, "jobs cannot be registered after the first insert"),
            Self::Spawn(e) => write!(f, "failed to spawn the worker task: {e}"),
        }
    }
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JobsMissing {
                registered,
                declared,
            } => write!(f, "only {registered} of {declared} jobs registered"),
            Self::Finished => write!(f, "stream already carries the end-of-stream marker"),
        }
    }
}

impl fmt::Display for ShutdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReclaimerPanicked => write!(f, "reclaimer task panicked"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
        }
    }
}

impl std::error::Error for RegisterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for InsertError {}

impl std::error::Error for ShutdownError {}
