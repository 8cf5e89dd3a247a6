//! Filesystem port.
//!
//! The copy engine never calls `std::fs` directly. Everything goes through the
//! [`Filesystem`] trait so the same engine can copy on the real disk
//! ([`OsFs`]) or inside a hermetic in-memory tree ([`MemoryFs`]).
//!
//! Implementations are shared between the walker and every copy worker, so
//! they must be safe for concurrent use.

mod memory;
mod os;

pub use memory::MemoryFs;
pub use os::OsFs;

use crate::utils::path::normalize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// The subset of metadata the copy engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Whether the path is a directory
    pub is_dir: bool,
    /// Permission bits (`0o7777` range)
    pub mode: u32,
}

/// Callback invoked by [`Filesystem::walk`] for every visited path.
///
/// The second argument tells whether the path is a directory. Returning an
/// error stops the walk and makes `walk` return that error.
pub type Visit<'a> = dyn FnMut(&Path, bool) -> io::Result<()> + 'a;

/// Minimal capability set required by the copy engine.
pub trait Filesystem: Send + Sync {
    /// Read the metadata of `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or cannot be inspected.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or inaccessible.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Create `path`, or truncate it if it exists, and open it for writing.
    ///
    /// The file ends up with permission bits `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or the file
    /// cannot be created.
    fn open_write(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + Send>>;

    /// Create `path` and all missing ancestors with permission bits `mode`.
    ///
    /// Existing directories are left untouched. When the copy engine creates
    /// the parents of a file, `mode` is the file's mode widened to keep the
    /// directory enterable: each read bit gains its execute bit and the owner
    /// gets `rwx` (`0o644` becomes `0o755`, `0o600` becomes `0o700`).
    ///
    /// # Errors
    ///
    /// Returns an error if a component exists as a file or cannot be created.
    fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Walk the tree rooted at `root` depth-first, parents before children,
    /// siblings in file name order, calling `visit` for every entry including
    /// `root` itself.
    ///
    /// Directory contents are read when the directory is reached, so entries
    /// created during the walk may or may not be observed.
    ///
    /// # Errors
    ///
    /// Returns the first traversal error, or the first error returned by
    /// `visit`.
    fn walk(&self, root: &Path, visit: &mut Visit<'_>) -> io::Result<()>;

    /// Spell `path` the way this filesystem identifies it, so that two
    /// spellings of one location compare equal.
    ///
    /// The copy engine compares resolved paths to detect copies onto the
    /// source itself or into one of its descendants. The default normalizes
    /// lexically, which suits filesystems without a working directory or
    /// symlinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(normalize(path))
    }
}
