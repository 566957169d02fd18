//! Recursive source file discovery.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{
    error::{ConfigError, DiscoverError},
    report::compare_paths,
};

const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Every file under `root` whose extension is in `extensions`, in natural
/// path order. Skips `node_modules`, `.git` and hidden directories.
pub fn discover_source_files(
    root: &Path,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: root.to_owned(),
        }
        .into());
    }

    let mut files = vec![];
    walk(root, extensions, &mut files)?;
    files.sort_by(|a, b| compare_paths(a, b));
    debug!(count = files.len(), root = %root.display(), "discovered source files");
    Ok(files)
}

fn walk(directory: &Path, extensions: &[&str], files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if is_skipped_directory(&path) {
                trace!(path = %path.display(), "skipping directory");
                continue;
            }
            walk(&path, extensions, files)?;
        } else if file_type.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_skipped_directory(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extensions.contains(&extension))
}
