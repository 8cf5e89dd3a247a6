//! Concurrent copy engine.
//!
//! - [`file`]: single file transfer
//! - [`walk`]: source traversal and destination deduplication
//! - [`pool`]: copy workers
//! - [`copier`]: orchestration of the above

mod copier;
mod file;
mod pool;
mod walk;

pub use copier::{Copier, CopyStats};
