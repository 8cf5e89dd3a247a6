//! # treecopy
//!
//! Concurrent recursive copying of files and directory trees.
//!
//! ## Core Features
//!
//! - **Parallel copying**: One walker feeds a pool of copy workers (10 by default)
//! - **Clobber guard**: An existing destination is refused unless clobbering is enabled
//! - **Overlap safe**: Every destination path is copied at most once, so copying
//!   a directory into its own parent terminates
//! - **Failure aggregation**: Per-file errors never stop the rest of the tree and
//!   are reported together once the copy finishes
//! - **Permission preserving**: Files keep their mode, the destination root keeps
//!   the source root's mode
//! - **Pluggable filesystem**: Runs on the OS filesystem or an in-memory tree
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("src", "dst").run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), treecopy::Error>(())
//! ```
//!
//! ## Copier API
//!
//! A [`Copier`] can be kept around and reused for many copies:
//!
//! ```no_run
//! use treecopy::{Copier, CopyOptions};
//!
//! let copier = Copier::default().with_options(
//!     CopyOptions::default()
//!         .with_parallel(32)  // More workers for network storage
//!         .with_clobber(true), // Overwrite an existing destination
//! );
//!
//! copier.copy("data", "backup")?;
//! copier.copy("config.toml", "backup/config.toml")?;
//! # Ok::<(), treecopy::Error>(())
//! ```
//!
//! ## Handling Failures
//!
//! A directory copy keeps going when single files fail and returns every
//! collected error at the end:
//!
//! ```no_run
//! use treecopy::{CopyBuilder, Error};
//!
//! match CopyBuilder::new("src", "dst").run() {
//!     Ok(stats) => println!("copied {} files", stats.files_copied),
//!     Err(Error::Failures(failures)) => {
//!         for error in &failures {
//!             eprintln!("{error}");
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: one `info` event per finished copy,
//! `debug` events per copied file and `warn` events for every failure. Install
//! any subscriber to see them.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod fs;
mod options;
mod utils;

pub use builder::CopyBuilder;
pub use copy::{Copier, CopyStats};
pub use error::{Error, Failures, Result};
pub use fs::{FileStat, Filesystem, MemoryFs, OsFs, Visit};
pub use options::{CopyOptions, DEFAULT_PARALLEL};
