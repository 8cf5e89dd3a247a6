//! Copy workers.
//!
//! Every worker drains the shared job queue until the walker closes it,
//! transferring one file per job. Failures go to the collector and never stop
//! the worker, so one bad file does not hold back the rest of the tree.

use super::file::transfer;
use super::walk::Job;
use crate::error::Error;
use crate::fs::Filesystem;
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Counters shared by all workers of one directory copy.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    files: AtomicU64,
    bytes: AtomicU64,
}

impl Tally {
    fn record(&self, bytes: u64) {
        self.files.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn files(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    pub(crate) fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

/// Run one worker until the job queue is closed and empty.
///
/// The worker's failure sender is dropped on return.
pub(crate) fn run_worker(
    fs: &dyn Filesystem,
    jobs: Receiver<Job>,
    failures: Sender<Error>,
    tally: &Tally,
) {
    for job in jobs.iter() {
        match transfer(fs, &job.from, &job.to) {
            Ok(bytes) => tally.record(bytes),
            Err(e) => {
                warn!(from = %job.from.display(), to = %job.to.display(), error = %e, "failed to copy file");
                if failures.send(e).is_err() {
                    break;
                }
            }
        }
    }
}
