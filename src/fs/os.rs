//! The real operating system filesystem.

use super::{FileStat, Filesystem, Visit};
use crate::utils::path::normalize;
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// [`Filesystem`] backed by `std::fs`.
///
/// Symlinks are followed when opening and stat-ing but never during a walk,
/// where they are reported as non-directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    /// Create a handle to the OS filesystem
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
fn mode_of(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(metadata: &fs::Metadata) -> u32 {
    match (metadata.is_dir(), metadata.permissions().readonly()) {
        (true, true) => 0o555,
        (true, false) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    }
}

#[cfg(unix)]
fn permissions_from(mode: u32) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    fs::Permissions::from_mode(mode)
}

impl Filesystem for OsFs {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path)?;
        Ok(FileStat {
            is_dir: metadata.is_dir(),
            mode: mode_of(&metadata),
        })
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }

    fn open_write(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + Send>> {
        let mut open = OpenOptions::new();
        open.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            open.mode(mode);
        }
        let file = open.open(path)?;
        // The creation mode is filtered by the umask and ignored for existing files.
        #[cfg(unix)]
        file.set_permissions(permissions_from(mode))?;
        #[cfg(not(unix))]
        let _ = mode;
        Ok(Box::new(file))
    }

    fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path)
    }

    fn walk(&self, root: &Path, visit: &mut Visit<'_>) -> io::Result<()> {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            visit(entry.path(), entry.file_type().is_dir())?;
        }
        Ok(())
    }

    /// Absolute form of `path` with its longest existing prefix
    /// canonicalized, so relative, absolute and symlinked spellings agree
    /// even when the tail does not exist yet.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = normalize(&std::path::absolute(path)?);
        let mut existing = absolute.as_path();
        let mut missing: Vec<&OsStr> = Vec::new();
        loop {
            if let Ok(canonical) = fs::canonicalize(existing) {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(canonical, |acc, name| acc.join(name)));
            }
            match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name);
                    existing = parent;
                }
                _ => break,
            }
        }
        Ok(absolute.clone())
    }
}
