//! Copy orchestration.
//!
//! [`Copier::copy`] validates the request, then either transfers a single
//! file directly or runs a directory copy:
//!
//! 1. Create the destination root with the source root's mode
//! 2. Start a dedicated thread pool holding one walker and `parallel` workers
//! 3. The walker feeds jobs through a rendezvous channel, the workers drain it
//! 4. The calling thread collects failures until every worker has exited
//!
//! Per-file failures never stop the other transfers; they are returned
//! together as [`Error::Failures`] once the whole tree has been processed.

use super::file::transfer;
use super::pool::{Tally, run_worker};
use super::walk::{Job, SeenSet, walk_tree};
use crate::error::{Error, Failures, Result};
use crate::fs::{Filesystem, OsFs};
use crate::options::CopyOptions;
use crate::utils::path::{is_strict_descendant, same_path};
use crossbeam_channel::bounded;
use rayon::ThreadPoolBuilder;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Statistics from a copy operation.
///
/// # Example
///
/// ```no_run
/// use treecopy::Copier;
///
/// let stats = Copier::default().copy("src", "dst")?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), treecopy::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of files successfully copied
    pub files_copied: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy operation
    pub duration: Duration,
}

/// Copies files and directory trees concurrently.
///
/// A `Copier` pairs a [`Filesystem`] (the OS filesystem by default) with
/// [`CopyOptions`]. It holds no per-copy state, so one instance can run any
/// number of copies, including from several threads at once.
///
/// # Example
///
/// ```no_run
/// use treecopy::{Copier, CopyOptions};
///
/// let copier = Copier::default().with_options(
///     CopyOptions::default().with_clobber(true).with_parallel(32),
/// );
/// copier.copy("/data/project", "/backup/project")?;
/// # Ok::<(), treecopy::Error>(())
/// ```
#[derive(Clone)]
pub struct Copier {
    fs: Arc<dyn Filesystem>,
    options: CopyOptions,
}

impl Default for Copier {
    fn default() -> Self {
        Self::new(OsFs)
    }
}

impl fmt::Debug for Copier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Copier")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Copier {
    /// Create a copier over `fs` with default options
    pub fn new(fs: impl Filesystem + 'static) -> Self {
        Self::from_shared(Arc::new(fs))
    }

    /// Create a copier over an already shared filesystem handle
    #[must_use]
    pub fn from_shared(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            fs,
            options: CopyOptions::default(),
        }
    }

    /// Replace the options
    #[must_use]
    pub fn with_options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options
    #[must_use]
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// The filesystem this copier operates on
    #[must_use]
    pub fn filesystem(&self) -> &dyn Filesystem {
        &*self.fs
    }

    /// Copy `from` to `to`.
    ///
    /// A file is copied to exactly `to`. A directory is copied recursively so
    /// that `to` ends up holding `from`'s contents. Copying a path onto itself
    /// succeeds without modifying anything; both paths are compared after
    /// [`Filesystem::resolve`], so `a.txt` and its absolute spelling count as
    /// the same path.
    ///
    /// Parent directories created for a file get the file's mode with an
    /// execute bit added for every read bit and `rwx` for the owner, so a
    /// `0o644` file lands in a `0o755` directory.
    ///
    /// # Errors
    ///
    /// - [`Error::Stat`] if `from` cannot be inspected
    /// - [`Error::ClobberAvoided`] if `to` exists and clobbering is disabled
    /// - [`Error::DestinationInsideSource`] if `to` is below the directory `from`
    /// - [`Error::DirectoryCreation`] if the destination root cannot be created
    /// - [`Error::ThreadPool`] if the workers cannot be started
    /// - any transfer error when copying a single file
    /// - [`Error::Failures`] with every per-file error of a directory copy
    pub fn copy(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<CopyStats> {
        let (from, to) = (from.as_ref(), to.as_ref());
        let fs = &*self.fs;
        let resolved_from = fs.resolve(from).map_err(|source| Error::Stat {
            path: from.to_path_buf(),
            source,
        })?;
        let resolved_to = fs.resolve(to).map_err(|source| Error::Stat {
            path: to.to_path_buf(),
            source,
        })?;
        if same_path(&resolved_from, &resolved_to) {
            debug!(path = %from.display(), "source and destination are the same, nothing to do");
            return Ok(CopyStats::default());
        }

        let start = Instant::now();
        let from_stat = fs.stat(from).map_err(|source| Error::Stat {
            path: from.to_path_buf(),
            source,
        })?;
        match fs.stat(to) {
            Ok(_) if !self.options.clobber => {
                return Err(Error::ClobberAvoided {
                    path: to.to_path_buf(),
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(Error::Stat {
                    path: to.to_path_buf(),
                    source,
                });
            }
        }

        let stats = if from_stat.is_dir {
            if is_strict_descendant(&resolved_to, &resolved_from) {
                return Err(Error::DestinationInsideSource {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                });
            }
            fs.mkdir_all(to, from_stat.mode)
                .map_err(|source| Error::DirectoryCreation {
                    path: to.to_path_buf(),
                    source,
                })?;
            self.copy_tree(from, to, start)?
        } else {
            let bytes = transfer(fs, from, to)?;
            CopyStats {
                files_copied: 1,
                bytes_copied: bytes,
                duration: start.elapsed(),
            }
        };

        info!(
            from = %from.display(),
            to = %to.display(),
            files = stats.files_copied,
            bytes = stats.bytes_copied,
            elapsed = ?stats.duration,
            "copy finished"
        );
        Ok(stats)
    }

    fn copy_tree(&self, from: &Path, to: &Path, start: Instant) -> Result<CopyStats> {
        let parallel = self.options.parallel();
        // One thread per worker plus the walker; the calling thread collects.
        let pool = ThreadPoolBuilder::new()
            .num_threads(parallel + 1)
            .thread_name(|i| format!("treecopy-{i}"))
            .build()?;

        let fs = &*self.fs;
        let seen = SeenSet::new();
        let tally = Tally::default();
        let (job_tx, job_rx) = bounded::<Job>(0);
        let (fail_tx, fail_rx) = bounded::<Error>(0);

        debug!(from = %from.display(), to = %to.display(), parallel, "starting directory copy");
        let errors: Vec<Error> = pool.in_place_scope(|s| {
            let seen = &seen;
            let tally = &tally;
            let walk_failures = fail_tx.clone();
            s.spawn(move |_| walk_tree(fs, from, to, seen, job_tx, &walk_failures));
            for _ in 0..parallel {
                let (jobs, failures) = (job_rx.clone(), fail_tx.clone());
                s.spawn(move |_| run_worker(fs, jobs, failures, tally));
            }
            drop(job_rx);
            drop(fail_tx);
            fail_rx.iter().collect()
        });
        debug!(claimed = seen.len(), failed = errors.len(), "directory copy drained");

        if !errors.is_empty() {
            return Err(Error::Failures(Failures::new(errors)));
        }
        Ok(CopyStats {
            files_copied: tally.files(),
            bytes_copied: tally.bytes(),
            duration: start.elapsed(),
        })
    }
}
