// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Input path lists and path normalization

use crate::error::{SkipReason, WarmupError, WarmupResult};
use jfs_warmup_proto::validate_entry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

/// Gather paths from the command line followed by the lines of `file`.
///
/// File lines are trimmed and blank lines dropped. There is no quoting or
/// escaping.
pub fn collect_paths<I>(args: I, file: Option<&Path>) -> WarmupResult<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    let mut paths: Vec<String> = args.into_iter().collect();
    let Some(file) = file else {
        return Ok(paths);
    };

    let list_error = |source| WarmupError::PathList {
        path: file.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(file).map_err(list_error)?);
    for line in reader.lines() {
        let line = line.map_err(list_error)?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(trimmed.to_string());
        }
    }
    Ok(paths)
}

/// Join `path` onto `base` unless it is already absolute, then fold `.` and
/// `..` lexically. Symlinks are not resolved.
pub fn absolutize_from(base: &Path, path: &Path) -> PathBuf {
    lexical_clean(&base.join(path))
}

pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            Component::Normal(part) => cleaned.push(part),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Entry sent to the service for an absolute path under `mount_root`.
///
/// The prefix is matched on whole components, so `/mnt/jfs2` is not under
/// `/mnt/jfs`. The mount root itself is sent as `/`. Entries that are not
/// valid UTF-8 are skipped rather than converted lossily.
pub fn relative_entry(mount_root: &Path, absolute: &Path) -> Result<String, SkipReason> {
    let rest = absolute
        .strip_prefix(mount_root)
        .map_err(|_| SkipReason::OutsideMount(mount_root.to_path_buf()))?;
    if rest.as_os_str().is_empty() {
        return Ok("/".to_string());
    }
    let entry = rest
        .to_str()
        .ok_or_else(|| SkipReason::NonUtf8(absolute.to_path_buf()))?;
    validate_entry(0, entry).map_err(SkipReason::InvalidEntry)?;
    Ok(entry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfs_warmup_proto::FrameError;
    use std::io::Write;

    #[test]
    fn cleans_dot_components() {
        assert_eq!(lexical_clean(Path::new("/mnt/jfs/./a/../b/")), PathBuf::from("/mnt/jfs/b"));
        assert_eq!(lexical_clean(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(
            absolutize_from(Path::new("/mnt/jfs/dir"), Path::new("../x")),
            PathBuf::from("/mnt/jfs/x")
        );
        assert_eq!(
            absolutize_from(Path::new("/home"), Path::new("/mnt/jfs/x")),
            PathBuf::from("/mnt/jfs/x")
        );
    }

    #[test]
    fn strips_mount_prefix_by_component() {
        let root = Path::new("/mnt/jfs");
        assert_eq!(relative_entry(root, Path::new("/mnt/jfs/x")), Ok("x".to_string()));
        assert_eq!(relative_entry(root, Path::new("/mnt/jfs/a/b.bin")), Ok("a/b.bin".to_string()));
        assert_eq!(relative_entry(root, Path::new("/mnt/jfs")), Ok("/".to_string()));
        assert_eq!(
            relative_entry(root, Path::new("/mnt/jfs2/x")),
            Err(SkipReason::OutsideMount(root.to_path_buf()))
        );
    }

    #[test]
    fn rejects_entry_with_newline() {
        let result = relative_entry(Path::new("/mnt/jfs"), Path::new("/mnt/jfs/bad\nname"));
        assert!(matches!(
            result,
            Err(SkipReason::InvalidEntry(FrameError::EmbeddedNewline { .. }))
        ));
    }

    #[test]
    fn non_utf8_entry_is_skipped_not_mangled() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/mnt/jfs/caf\xe9/x"));
        assert_eq!(
            relative_entry(Path::new("/mnt/jfs"), path),
            Err(SkipReason::NonUtf8(path.to_path_buf()))
        );
    }

    #[test]
    fn collects_args_then_file_lines() {
        let mut list = tempfile::NamedTempFile::new().unwrap();
        writeln!(list, "  /mnt/jfs/a  ").unwrap();
        writeln!(list).unwrap();
        writeln!(list, "\t").unwrap();
        writeln!(list, "/mnt/jfs/b").unwrap();

        let paths = collect_paths(vec!["/mnt/jfs/arg".to_string()], Some(list.path())).unwrap();
        assert_eq!(paths, vec!["/mnt/jfs/arg", "/mnt/jfs/a", "/mnt/jfs/b"]);
    }

    #[test]
    fn missing_list_file_is_fatal() {
        let err = collect_paths(Vec::new(), Some(Path::new("/nonexistent/paths.txt"))).unwrap_err();
        assert!(matches!(err, WarmupError::PathList { .. }));
    }
}
