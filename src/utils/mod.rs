//! Internal helpers shared by the copy engine and the filesystems.

pub(crate) mod path;
