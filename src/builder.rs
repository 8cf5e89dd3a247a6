//! Builder API for ergonomic copying operations.
//!
//! The builder pattern provides a fluent interface for configuring and executing
//! copy operations. This is often more convenient than constructing a
//! [`Copier`] and [`CopyOptions`] by hand.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! // Simple copy with defaults
//! let stats = CopyBuilder::new("src", "dst").run()?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), treecopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("src", "dst")
//!     .parallel(32)   // 32 copy workers
//!     .clobber()      // Replace an existing destination
//!     .run()?;
//! # Ok::<(), treecopy::Error>(())
//! ```

use crate::copy::{Copier, CopyStats};
use crate::error::Result;
use crate::fs::{Filesystem, OsFs};
use crate::options::CopyOptions;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for configuring and executing one copy operation.
///
/// Works for files and directories alike; [`CopyBuilder::run`] decides which
/// kind of copy to perform from the source's metadata.
///
/// # Example
///
/// ```no_run
/// use treecopy::CopyBuilder;
///
/// let stats = CopyBuilder::new("/data/project", "/backup/project")
///     .parallel(16)
///     .clobber()
///     .run()?;
/// # Ok::<(), treecopy::Error>(())
/// ```
#[derive(Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
    fs: Arc<dyn Filesystem>,
}

impl fmt::Debug for CopyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyBuilder")
            .field("src", &self.src)
            .field("dst", &self.dst)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (10 workers, no clobbering) on the OS filesystem.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
            fs: Arc::new(OsFs),
        }
    }

    /// Set the number of copy workers.
    ///
    /// Default is 10. Zero falls back to the default.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use treecopy::CopyBuilder;
    ///
    /// let stats = CopyBuilder::new("src", "dst")
    ///     .parallel(4)
    ///     .run()?;
    /// # Ok::<(), treecopy::Error>(())
    /// ```
    #[must_use]
    pub fn parallel(mut self, workers: usize) -> Self {
        self.options = self.options.with_parallel(workers);
        self
    }

    /// Allow copying over an existing destination.
    #[must_use]
    pub fn clobber(mut self) -> Self {
        self.options = self.options.with_clobber(true);
        self
    }

    /// Refuse to copy when the destination already exists (default behavior).
    #[must_use]
    pub fn no_clobber(mut self) -> Self {
        self.options = self.options.with_clobber(false);
        self
    }

    /// Run the copy against another [`Filesystem`].
    ///
    /// # Example
    ///
    /// ```
    /// use treecopy::{CopyBuilder, MemoryFs};
    ///
    /// let fs = MemoryFs::new();
    /// fs.write_file("/src/a.txt", b"alpha", 0o644)?;
    ///
    /// let stats = CopyBuilder::new("/src", "/dst")
    ///     .filesystem(fs.clone())
    ///     .run()?;
    /// assert_eq!(stats.files_copied, 1);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn filesystem(mut self, fs: impl Filesystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy operation.
    ///
    /// # Errors
    ///
    /// Fails like [`Copier::copy`].
    pub fn run(self) -> Result<CopyStats> {
        Copier::from_shared(self.fs)
            .with_options(self.options)
            .copy(&self.src, &self.dst)
    }
}
