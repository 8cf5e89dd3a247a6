//! Single file transfer.
//!
//! Copies one file's bytes and permission bits through a [`Filesystem`],
//! creating the destination's parent directories on the way. Clobber checks
//! belong to the caller: an existing destination is truncated.

use crate::error::{Error, Result};
use crate::fs::Filesystem;
use std::io;
use std::path::Path;
use tracing::debug;

/// Mode for directories created on behalf of a file with mode `file_mode`.
///
/// Every read bit gains the matching execute bit and the owner always gets
/// `rwx`, so the directory can be entered and written into.
pub(crate) fn dir_mode_for(file_mode: u32) -> u32 {
    file_mode | ((file_mode & 0o444) >> 2) | 0o700
}

/// Copy `from` to `to`, returning the number of bytes written.
///
/// # Errors
///
/// - [`Error::Open`] if `from` cannot be opened
/// - [`Error::Stat`] if `from`'s metadata cannot be read
/// - [`Error::DirectoryCreation`] if `to`'s parent cannot be created
/// - [`Error::Create`] if `to` cannot be created or truncated
/// - [`Error::Copy`] if streaming fails; the partial file is kept
pub(crate) fn transfer(fs: &dyn Filesystem, from: &Path, to: &Path) -> Result<u64> {
    let mut reader = fs.open_read(from).map_err(|source| Error::Open {
        path: from.to_path_buf(),
        source,
    })?;

    let mode = fs
        .stat(from)
        .map_err(|source| Error::Stat {
            path: from.to_path_buf(),
            source,
        })?
        .mode;

    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.mkdir_all(parent, dir_mode_for(mode))
            .map_err(|source| Error::DirectoryCreation {
                path: to.to_path_buf(),
                source,
            })?;
    }

    let mut writer = fs.open_write(to, mode).map_err(|source| Error::Create {
        path: to.to_path_buf(),
        source,
    })?;

    let bytes = io::copy(&mut reader, &mut writer)
        .and_then(|bytes| writer.flush().map(|()| bytes))
        .map_err(|source| Error::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;

    debug!(
        from = %from.display(),
        to = %to.display(),
        bytes,
        "copied file"
    );
    Ok(bytes)
}
