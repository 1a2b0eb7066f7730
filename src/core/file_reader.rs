//! Source file reading
//!
//! Provides consistent handling for:
//! - Non-UTF-8 files
//! - Oversized files
//! - Binary files

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Default maximum file size in bytes (64 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Bytes inspected for NUL when sniffing binary content
const BINARY_SNIFF_LEN: usize = 8192;

/// Configuration for file reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReadConfig {
    /// Maximum file size to process (bytes)
    pub max_file_size: u64,
}

impl Default for FileReadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Text of a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub content: String,

    /// Whether invalid UTF-8 was replaced with U+FFFD
    pub lossy: bool,
}

/// Read a source file with the given configuration
pub fn read_source(path: &Path, config: &FileReadConfig) -> Result<SourceText> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;

    let size = metadata.len();
    if size > config.max_file_size {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: config.max_file_size,
        });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    fs::File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|e| Error::io(path, e))?;

    let sniff_len = std::cmp::min(BINARY_SNIFF_LEN, bytes.len());
    if bytes[..sniff_len].contains(&0) {
        return Err(Error::Binary {
            path: path.to_path_buf(),
        });
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(SourceText {
            content,
            lossy: false,
        }),
        Err(e) => Ok(SourceText {
            content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            lossy: true,
        }),
    }
}

/// Convenience function with default config
pub fn read_source_safe(path: &Path) -> Option<String> {
    read_source(path, &FileReadConfig::default())
        .ok()
        .map(|text| text.content)
}
