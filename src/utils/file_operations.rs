use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::DeployError;

/// Check if file matches any of the given extensions
/// Pure function; entries match with or without the leading dot,
/// ASCII case-insensitively. An empty allow-list matches everything.
pub fn matches_extensions(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_with_dot = format!(".{}", ext);
            extensions.iter().any(|target_ext| {
                target_ext.eq_ignore_ascii_case(&ext_with_dot)
                    || target_ext.eq_ignore_ascii_case(ext)
            })
        })
        .unwrap_or(false)
}

/// Remove every direct child of a directory
///
/// Files are deleted individually, subdirectories recursively. A missing
/// path is left alone. A path occupied by a non-directory is reported as
/// a typed error before anything is deleted.
pub fn clear_directory(directory: &Path) -> Result<()> {
    if !directory.exists() {
        return Ok(());
    }

    if !directory.is_dir() {
        return Err(DeployError::DestinationNotADirectory {
            path: directory.to_path_buf(),
        }
        .into());
    }

    let entries = fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {:?}", directory))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in: {:?}", directory))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to read file type of: {:?}", path))?;

        if file_type.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove directory: {:?}", path))?;
        } else {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", path))?;
        }
    }

    Ok(())
}

/// Create a directory, including any missing parents
pub fn ensure_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory: {:?}", directory))
}

/// Lazy depth-first walk over the regular files under a directory
///
/// Entries are yielded as they are visited instead of materializing the
/// whole tree. Each directory's children are sorted by name, so the
/// enumeration order is stable across runs with unchanged inputs.
pub struct SourceWalker {
    stack: Vec<PathBuf>,
}

impl SourceWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            stack: vec![root.as_ref().to_path_buf()],
        }
    }

    fn read_sorted(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<PathBuf>>>()?;
        children.sort();
        Ok(children)
    }
}

impl Iterator for SourceWalker {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            if path.is_dir() {
                match Self::read_sorted(&path) {
                    Ok(mut children) => {
                        // Popped from the back, so reverse to visit the
                        // first-sorted child next
                        children.reverse();
                        self.stack.append(&mut children);
                    }
                    Err(e) => return Some(Err(e)),
                }
            } else if path.is_file() {
                return Some(Ok(path));
            }
            // Anything else (sockets, dangling links) is skipped
        }
        None
    }
}

/// Result of copying one source file into the destination
#[derive(Debug, Clone)]
pub struct CopyOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub overwrote: bool,
}

/// Copy a file into a directory under its base filename
///
/// The source's subpath is discarded. Returns whether an existing file
/// at the destination name was replaced.
pub fn copy_flat(source: &Path, destination_dir: &Path) -> Result<CopyOutcome> {
    let file_name = source
        .file_name()
        .with_context(|| format!("Source path has no file name: {:?}", source))?;
    let destination = destination_dir.join(file_name);
    let overwrote = destination.exists();

    fs::copy(source, &destination)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, destination))?;

    Ok(CopyOutcome {
        source: source.to_path_buf(),
        destination,
        overwrote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }

    #[test]
    fn test_matches_extensions() {
        let path = Path::new("test.c");
        let extensions = vec![".c".to_string(), ".h".to_string()];
        assert!(matches_extensions(path, &extensions));

        let extensions = vec![".h".to_string()];
        assert!(!matches_extensions(path, &extensions));
    }

    #[test]
    fn test_matches_extensions_case_insensitive_and_dot_optional() {
        let path = Path::new("test.C");
        assert!(matches_extensions(path, &[".c".to_string()]));
        assert!(matches_extensions(path, &["c".to_string()]));
    }

    #[test]
    fn test_matches_extensions_no_extension() {
        assert!(!matches_extensions(Path::new("Makefile"), &[".c".to_string()]));
    }

    #[test]
    fn test_walker_yields_nested_files_in_sorted_order() {
        let tmp = tempdir().unwrap();
        touch(&tmp.path().join("b.c"));
        touch(&tmp.path().join("a/deep/x.h"));
        touch(&tmp.path().join("a/y.c"));

        let files: Vec<PathBuf> = SourceWalker::new(tmp.path())
            .collect::<io::Result<Vec<_>>>()
            .unwrap();

        let expected = vec![
            tmp.path().join("a/deep/x.h"),
            tmp.path().join("a/y.c"),
            tmp.path().join("b.c"),
        ];
        assert_eq!(files, expected);
    }

    #[test]
    fn test_walker_on_empty_directory() {
        let tmp = tempdir().unwrap();
        assert_eq!(SourceWalker::new(tmp.path()).count(), 0);
    }

    #[test]
    fn test_clear_directory_removes_files_and_subdirectories() {
        let tmp = tempdir().unwrap();
        touch(&tmp.path().join("stale.c"));
        touch(&tmp.path().join("sub/nested.h"));

        clear_directory(tmp.path()).unwrap();

        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
        assert!(tmp.path().exists());
    }

    #[test]
    fn test_clear_directory_ignores_missing_path() {
        let tmp = tempdir().unwrap();
        clear_directory(&tmp.path().join("not-there")).unwrap();
    }

    #[test]
    fn test_clear_directory_rejects_regular_file() {
        let tmp = tempdir().unwrap();
        let occupied = tmp.path().join("out");
        touch(&occupied);

        let err = clear_directory(&occupied).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        assert!(occupied.exists());
    }

    #[test]
    fn test_copy_flat_discards_subpath_and_reports_overwrite() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("src/sub/code.c");
        touch(&source);
        let mut f = File::create(&source).unwrap();
        writeln!(f, "int main() {{}}").unwrap();
        let dest_dir = tmp.path().join("out");
        fs::create_dir_all(&dest_dir).unwrap();

        let first = copy_flat(&source, &dest_dir).unwrap();
        assert_eq!(first.destination, dest_dir.join("code.c"));
        assert!(!first.overwrote);

        let second = copy_flat(&source, &dest_dir).unwrap();
        assert!(second.overwrote);
    }
}
