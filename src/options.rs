//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`], the per-copier configuration.
//!
//! # Example
//!
//! ```
//! use treecopy::CopyOptions;
//!
//! let options = CopyOptions::default()
//!     .with_parallel(8)
//!     .with_clobber(true);
//! assert_eq!(options.parallel(), 8);
//! ```

/// Number of copy workers used when none is configured.
pub const DEFAULT_PARALLEL: usize = 10;

/// Options for copy operations.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `clobber` | `false` | Refuse to copy onto an existing destination |
/// | `parallel` | 0 (= 10) | Concurrent file transfers |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Whether to copy onto a destination that already exists, potentially
    /// overwriting files in it.
    pub clobber: bool,

    /// Number of parallel copy workers.
    ///
    /// `0` means unset and resolves to [`DEFAULT_PARALLEL`]. Each worker holds
    /// two open files at a time, so keep this under the process's open file
    /// descriptor limit.
    pub parallel: usize,
}

impl CopyOptions {
    /// Allow or forbid copying onto an existing destination
    #[must_use]
    pub fn with_clobber(mut self, clobber: bool) -> Self {
        self.clobber = clobber;
        self
    }

    /// Set the number of parallel workers (`0` restores the default)
    #[must_use]
    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = n;
        self
    }

    /// Effective number of workers, always at least 1
    #[must_use]
    pub fn parallel(&self) -> usize {
        if self.parallel == 0 {
            DEFAULT_PARALLEL
        } else {
            self.parallel
        }
    }
}
