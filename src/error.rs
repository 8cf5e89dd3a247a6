//! Error types for treecopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy operations, the [`Failures`] aggregate returned
//! by directory copies, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Validation | [`Error::Stat`], [`Error::ClobberAvoided`], [`Error::DestinationInsideSource`] |
//! | Transfer | [`Error::Open`], [`Error::DirectoryCreation`], [`Error::Create`], [`Error::Copy`] |
//! | Traversal | [`Error::Walk`] |
//! | Runtime | [`Error::ThreadPool`] |
//! | Aggregate | [`Error::Failures`] |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for treecopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during copy operations.
///
/// Every I/O variant carries the path involved and the underlying
/// [`io::Error`], reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read metadata of a path
    #[error("reading file metadata of {}: {source}", path.display())]
    Stat {
        /// Path whose metadata could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination exists and clobbering is disabled
    #[error("avoided attempt to clobber existing file or directory {path:?}")]
    ClobberAvoided {
        /// The existing destination
        path: PathBuf,
    },

    /// Destination lies inside the source directory
    ///
    /// Copying a directory into one of its own descendants would keep feeding
    /// the walk with freshly created files, so it is rejected up front.
    #[error("cannot copy {} into its own descendant {}", from.display(), to.display())]
    DestinationInsideSource {
        /// Source directory
        from: PathBuf,
        /// Destination inside `from`
        to: PathBuf,
    },

    /// Failed to open the source file for reading
    #[error("opening {}: {source}", path.display())]
    Open {
        /// Source file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to create the destination's parent directories
    #[error("preparing directories for {}: {source}", path.display())]
    DirectoryCreation {
        /// Path whose directories could not be created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to create or truncate the destination file
    #[error("creating {}: {source}", path.display())]
    Create {
        /// Destination file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed while streaming bytes between files
    ///
    /// The partially written destination is left in place.
    #[error("copying file from {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source file
        from: PathBuf,
        /// Destination file
        to: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Traversal of the source tree failed
    #[error("walking file system at {}: {source}", path.display())]
    Walk {
        /// Root of the failed traversal
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The worker thread pool could not be started
    #[error("starting copy workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// One or more files of a directory copy failed
    #[error("{0}")]
    Failures(Failures),
}

/// Unordered collection of the errors gathered during a directory copy.
///
/// Rendered as a bracketed list with one error message per line:
///
/// ```text
/// [opening /src/a: permission denied,
/// opening /src/b: permission denied
/// ]
/// ```
#[derive(Debug, Default)]
pub struct Failures {
    errors: Vec<Error>,
}

impl Failures {
    pub(crate) fn new(errors: Vec<Error>) -> Self {
        Self { errors }
    }

    /// Number of collected errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error was collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the collected errors in arrival order
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// Consume the aggregate and return the individual errors
    #[must_use]
    pub fn into_inner(self) -> Vec<Error> {
        self.errors
    }
}

impl fmt::Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "{error}")?;
            if i + 1 != self.errors.len() {
                f.write_str(",\n")?;
            }
        }
        f.write_str("\n]")
    }
}

impl<'a> IntoIterator for &'a Failures {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
