//! Lexical path helpers.
//!
//! The copy engine talks to an abstract [`Filesystem`](crate::Filesystem), so
//! nothing here touches the disk: paths are compared and rebased purely by
//! their components.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically.
///
/// Removes `.` components and resolves `..` against preceding normal
/// components. Leading `..` of a relative path are kept; `..` directly below
/// the root is dropped.
///
/// ```text
/// a/./b/../c  -> a/c
/// /../a       -> /a
/// ../a        -> ../a
/// ```
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Whether two paths name the same location once normalized.
pub(crate) fn same_path(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

/// Whether `path` lies strictly below `ancestor`.
///
/// A relative path is never considered inside an absolute one (and vice
/// versa) because they cannot be related without consulting the filesystem.
pub(crate) fn is_strict_descendant(path: &Path, ancestor: &Path) -> bool {
    let path = normalize(path);
    let ancestor = normalize(ancestor);
    if path == ancestor {
        return false;
    }
    if ancestor == Path::new(".") {
        return path.is_relative() && !path.starts_with("..");
    }
    path.starts_with(&ancestor)
}

/// Map `path`, found below `from_root`, to the same relative location below
/// `to_root`.
///
/// Returns `None` when `path` is not below `from_root`.
pub(crate) fn rebase(path: &Path, from_root: &Path, to_root: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(from_root).ok()?;
    if relative.as_os_str().is_empty() {
        Some(to_root.to_path_buf())
    } else {
        Some(to_root.join(relative))
    }
}
