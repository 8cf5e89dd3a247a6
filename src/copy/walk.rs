//! Source tree traversal.
//!
//! The walker is the single producer of a directory copy: it visits the
//! source tree and hands one [`Job`] per file to the worker pool. Destination
//! paths are claimed in a [`SeenSet`] before they are queued, so a path that
//! shows up again during the walk (because the destination overlaps the
//! source) is never copied twice.

use crate::error::Error;
use crate::fs::Filesystem;
use crate::utils::path::rebase;
use crossbeam_channel::Sender;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{trace, warn};

/// One file to transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Job {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Destination paths already queued during one directory copy.
#[derive(Debug, Default)]
pub(crate) struct SeenSet {
    paths: Mutex<HashSet<PathBuf>>,
}

impl SeenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim `path`. Returns `true` only for the first claim.
    pub(crate) fn claim(&self, path: &Path) -> bool {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf())
    }

    pub(crate) fn len(&self) -> usize {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Walk `from` and queue a job for every file not already claimed.
///
/// Takes ownership of the job sender and drops it on return, which closes the
/// queue for the workers whether or not the walk succeeded. A traversal
/// failure is reported once on `failures` as [`Error::Walk`].
pub(crate) fn walk_tree(
    fs: &dyn Filesystem,
    from: &Path,
    to: &Path,
    seen: &SeenSet,
    jobs: Sender<Job>,
    failures: &Sender<Error>,
) {
    let result = fs.walk(from, &mut |path, is_dir| {
        if is_dir {
            return Ok(());
        }
        let Some(dst) = rebase(path, from, to) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is outside of {}", path.display(), from.display()),
            ));
        };
        if !seen.claim(&dst) {
            trace!(path = %dst.display(), "destination already claimed, skipping");
            return Ok(());
        }
        jobs.send(Job {
            from: path.to_path_buf(),
            to: dst,
        })
        .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "copy workers exited early"))
    });

    if let Err(source) = result {
        warn!(path = %from.display(), error = %source, "walk failed");
        // Only fails if the collector is gone, in which case nobody is left to tell.
        let _ = failures.send(Error::Walk {
            path: from.to_path_buf(),
            source,
        });
    }
    drop(jobs);
}
