//! Destination for generated files

use std::io;
use std::path::Path;

/// Where rendered files end up
pub trait OutputSink {
    /// Create a directory and its parents. Must succeed if it already exists.
    fn ensure_directory(&self, path: &Path) -> io::Result<()>;

    /// Create or overwrite a file
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes straight to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn ensure_directory(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
