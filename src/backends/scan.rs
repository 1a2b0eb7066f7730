//! File scanning backend
//!
//! Uses the ignore crate to walk a source tree and keep the files a
//! literal scanner exists for.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::extract::Language;

/// A file selected for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
}

/// Walker options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Include hidden files and directories
    pub hidden: bool,
    /// Honor .gitignore, .ignore and global ignore files
    pub ignore: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            hidden: false,
            ignore: true,
        }
    }
}

/// Collect the source files under `root`, sorted by path
pub fn scan_files(root: &Path, options: ScanOptions) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        return Err(Error::Argument(format!(
            "directory not found: {}",
            root.display()
        )));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.hidden)
        .ignore(options.ignore)
        .parents(options.ignore)
        .git_ignore(options.ignore)
        .git_global(options.ignore)
        .git_exclude(options.ignore);

    let mut files = Vec::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.into_path();
        if let Some(language) = Language::from_path(&path) {
            files.push(SourceFile { path, language });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), count = files.len(), "collected source files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn names(files: &[SourceFile], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = tempdir().unwrap();
        let result = scan_files(temp.path(), ScanOptions::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_keeps_known_languages() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("main.c")).unwrap();
        File::create(temp.path().join("tool.py")).unwrap();
        File::create(temp.path().join("notes.txt")).unwrap();
        File::create(temp.path().join("lib.rs")).unwrap();
        fs::create_dir(temp.path().join("web")).unwrap();
        File::create(temp.path().join("web/app.jsx")).unwrap();

        let result = scan_files(temp.path(), ScanOptions::default()).unwrap();
        assert_eq!(
            names(&result, temp.path()),
            vec!["main.c", "tool.py", "web/app.jsx"]
        );
        assert_eq!(result[2].language, Language::JavaScript);
    }

    #[test]
    fn test_scan_hidden() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join(".cache")).unwrap();
        File::create(temp.path().join(".cache/gen.c")).unwrap();
        File::create(temp.path().join("main.c")).unwrap();

        let default = scan_files(temp.path(), ScanOptions::default()).unwrap();
        assert_eq!(names(&default, temp.path()), vec!["main.c"]);

        let options = ScanOptions {
            hidden: true,
            ..Default::default()
        };
        let all = scan_files(temp.path(), options).unwrap();
        assert_eq!(names(&all, temp.path()), vec![".cache/gen.c", "main.c"]);
    }

    #[test]
    fn test_scan_ignore_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".ignore"), "build/\n").unwrap();
        fs::create_dir(temp.path().join("build")).unwrap();
        File::create(temp.path().join("build/out.js")).unwrap();
        File::create(temp.path().join("src.js")).unwrap();

        let default = scan_files(temp.path(), ScanOptions::default()).unwrap();
        assert_eq!(names(&default, temp.path()), vec!["src.js"]);

        let options = ScanOptions {
            ignore: false,
            ..Default::default()
        };
        let all = scan_files(temp.path(), options).unwrap();
        assert_eq!(names(&all, temp.path()), vec!["build/out.js", "src.js"]);
    }

    #[test]
    fn test_scan_missing_dir() {
        let temp = tempdir().unwrap();
        let err = scan_files(&temp.path().join("nope"), ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Argument(_)));
    }
}
