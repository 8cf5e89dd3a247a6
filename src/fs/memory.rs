//! In-memory filesystem.

use super::{FileStat, Filesystem, Visit};
use crate::utils::path::normalize;
use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const ROOT_MODE: u32 = 0o755;

#[derive(Debug)]
enum Node {
    Dir { mode: u32 },
    File { mode: u32, data: Vec<u8> },
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    denied: HashSet<PathBuf>,
}

/// A [`Filesystem`] kept entirely in memory.
///
/// Cloning the handle shares the underlying tree. Paths are normalized
/// lexically, the root (`/`) and the current directory (`.`) always exist,
/// and there are no symlinks.
///
/// Paths registered with [`MemoryFs::deny`] fail every open and directory
/// listing with [`io::ErrorKind::PermissionDenied`], which makes it easy to
/// inject failures into a copy.
///
/// Directories a copy creates for a file's parents get the file's mode widened
/// to stay enterable, as described on [`Filesystem::mkdir_all`].
///
/// # Example
///
/// ```
/// use treecopy::{Copier, CopyOptions, MemoryFs};
///
/// let fs = MemoryFs::new();
/// fs.write_file("/src/a.txt", b"alpha", 0o644)?;
///
/// Copier::new(fs.clone()).copy("/src", "/dst")?;
/// assert_eq!(fs.read_file("/dst/a.txt")?, b"alpha");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<State>>,
}

fn is_root(key: &Path) -> bool {
    key == Path::new("/") || key == Path::new(".") || key.as_os_str().is_empty()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{}: permission denied", path.display()),
    )
}

impl MemoryFs {
    /// Create an empty filesystem
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every open and directory listing of `path` fail with
    /// `PermissionDenied`
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.lock().denied.insert(normalize(path.as_ref()));
    }

    /// Lift a restriction added by [`MemoryFs::deny`]
    pub fn allow(&self, path: impl AsRef<Path>) {
        self.lock().denied.remove(&normalize(path.as_ref()));
    }

    /// Write a whole file, creating missing parent directories with mode
    /// `0o755`.
    ///
    /// # Errors
    ///
    /// Fails like [`Filesystem::mkdir_all`] and [`Filesystem::open_write`].
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
        mode: u32,
    ) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.mkdir_all(parent, ROOT_MODE)?;
        }
        self.open_write(path, mode)?.write_all(contents.as_ref())
    }

    /// Read a whole file, ignoring [`MemoryFs::deny`] restrictions.
    ///
    /// # Errors
    ///
    /// Fails if `path` is missing or is a directory.
    pub fn read_file(&self, path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        let path = path.as_ref();
        match self.lock().nodes.get(&normalize(path)) {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            Some(Node::Dir { .. }) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{}: is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    /// Every file below `root`, keyed by its path relative to `root`.
    #[must_use]
    pub fn files_under(&self, root: impl AsRef<Path>) -> BTreeMap<PathBuf, Vec<u8>> {
        let root = normalize(root.as_ref());
        self.lock()
            .nodes
            .iter()
            .filter_map(|(key, node)| match node {
                Node::File { data, .. } => {
                    let relative = if is_root(&root) && key.is_relative() {
                        key.as_path()
                    } else {
                        key.strip_prefix(&root).ok()?
                    };
                    Some((relative.to_path_buf(), data.clone()))
                }
                Node::Dir { .. } => None,
            })
            .collect()
    }

    fn child_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let key = normalize(path);
        let state = self.lock();
        if state.denied.contains(&key) {
            return Err(permission_denied(path));
        }
        let parent = if key == Path::new(".") {
            PathBuf::new()
        } else {
            key
        };
        let mut names: Vec<OsString> = state
            .nodes
            .keys()
            .filter(|k| k.parent() == Some(parent.as_path()))
            .filter_map(|k| k.file_name().map(OsString::from))
            .collect();
        names.sort();
        Ok(names)
    }

    fn walk_from(&self, path: &Path, visit: &mut Visit<'_>) -> io::Result<()> {
        let stat = self.stat(path)?;
        visit(path, stat.is_dir)?;
        if !stat.is_dir {
            return Ok(());
        }
        for name in self.child_names(path)? {
            self.walk_from(&path.join(name), visit)?;
        }
        Ok(())
    }
}

impl Filesystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let key = normalize(path);
        if is_root(&key) {
            return Ok(FileStat {
                is_dir: true,
                mode: ROOT_MODE,
            });
        }
        match self.lock().nodes.get(&key) {
            Some(Node::Dir { mode }) => Ok(FileStat {
                is_dir: true,
                mode: *mode,
            }),
            Some(Node::File { mode, .. }) => Ok(FileStat {
                is_dir: false,
                mode: *mode,
            }),
            None => Err(not_found(path)),
        }
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let key = normalize(path);
        let state = self.lock();
        if state.denied.contains(&key) {
            return Err(permission_denied(path));
        }
        match state.nodes.get(&key) {
            Some(Node::File { data, .. }) => Ok(Box::new(Cursor::new(data.clone()))),
            Some(Node::Dir { .. }) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{}: is a directory", path.display()),
            )),
            None if is_root(&key) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{}: is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn open_write(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + Send>> {
        let key = normalize(path);
        let mut state = self.lock();
        if state.denied.contains(&key) {
            return Err(permission_denied(path));
        }
        if is_root(&key) || matches!(state.nodes.get(&key), Some(Node::Dir { .. })) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{}: is a directory", path.display()),
            ));
        }
        let parent = key.parent().unwrap_or(Path::new(""));
        if !is_root(parent) {
            match state.nodes.get(parent) {
                Some(Node::Dir { .. }) => {}
                Some(Node::File { .. }) => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("{}: not a directory", parent.display()),
                    ));
                }
                None => return Err(not_found(parent)),
            }
        }
        state.nodes.insert(
            key.clone(),
            Node::File {
                mode,
                data: Vec::new(),
            },
        );
        Ok(Box::new(MemoryWriter {
            state: Arc::clone(&self.state),
            key,
        }))
    }

    fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        let key = normalize(path);
        let mut state = self.lock();
        let mut ancestors: Vec<&Path> = key.ancestors().filter(|a| !is_root(a)).collect();
        ancestors.reverse();
        for dir in ancestors {
            match state.nodes.get(dir) {
                Some(Node::Dir { .. }) => {}
                Some(Node::File { .. }) => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("{}: not a directory", dir.display()),
                    ));
                }
                None => {
                    state.nodes.insert(dir.to_path_buf(), Node::Dir { mode });
                }
            }
        }
        Ok(())
    }

    fn walk(&self, root: &Path, visit: &mut Visit<'_>) -> io::Result<()> {
        self.walk_from(root, visit)
    }
}

/// Appends written bytes to a file node of a [`MemoryFs`].
struct MemoryWriter {
    state: Arc<Mutex<State>>,
    key: PathBuf,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.nodes.get_mut(&self.key) {
            Some(Node::File { data, .. }) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            _ => Err(not_found(&self.key)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
