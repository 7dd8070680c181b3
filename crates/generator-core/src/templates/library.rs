//! Access to the template library

use crate::error::{GeneratorError, Result};
use globset::{GlobBuilder, GlobMatcher};
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read access to a tree of template files
pub trait TemplateLibrary {
    /// Paths of regular files matching a glob such as `common/**/*`.
    /// Paths are relative to the library root and `/`-separated.
    fn list_files(&self, pattern: &str) -> Result<Vec<String>>;

    /// Raw content of a listed file
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| GeneratorError::Listing {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// Template library stored in a local directory
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateLibrary for DirectoryLibrary {
    fn list_files(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = compile_pattern(pattern)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| GeneratorError::Listing {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if matcher.is_match(&relative) {
                files.push(relative);
            }
        }

        Ok(files)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(self.root.join(path)).map_err(|e| GeneratorError::TemplateNotFound {
            path: path.to_string(),
            source: Some(e),
        })
    }
}

#[derive(RustEmbed)]
#[folder = "templates/"]
struct BundledTemplates;

/// Template library compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLibrary;

impl TemplateLibrary for EmbeddedLibrary {
    fn list_files(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = compile_pattern(pattern)?;

        let mut files: Vec<String> = BundledTemplates::iter()
            .filter(|path| matcher.is_match(&**path))
            .map(|path| path.into_owned())
            .collect();
        files.sort();

        Ok(files)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        BundledTemplates::get(path)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| GeneratorError::TemplateNotFound {
                path: path.to_string(),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn library_with(files: &[&str]) -> (tempfile::TempDir, DirectoryLibrary) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, file).unwrap();
        }
        let library = DirectoryLibrary::new(dir.path());
        (dir, library)
    }

    #[test]
    fn test_lists_files_recursively_in_sorted_order() {
        let (_dir, library) = library_with(&[
            "common/lang/contexts.json",
            "common/LICENSE.md",
            "js/src/index.js",
            "js/package.json",
        ]);

        assert_eq!(
            library.list_files("common/**/*").unwrap(),
            vec!["common/LICENSE.md", "common/lang/contexts.json"]
        );
        assert_eq!(
            library.list_files("js/**/*").unwrap(),
            vec!["js/package.json", "js/src/index.js"]
        );
    }

    #[test]
    fn test_listing_skips_directories_and_other_sets() {
        let (dir, library) = library_with(&["js/package.json", "js-legacy/package.json"]);
        fs::create_dir_all(dir.path().join("js/empty")).unwrap();

        assert_eq!(library.list_files("js/**/*").unwrap(), vec!["js/package.json"]);
        assert_eq!(
            library.list_files("js-legacy/**/*").unwrap(),
            vec!["js-legacy/package.json"]
        );
    }

    #[test]
    fn test_read_missing_template() {
        let (_dir, library) = library_with(&[]);

        let err = library.read("js/package.json").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::TemplateNotFound { ref path, .. } if path == "js/package.json"
        ));
    }

    #[test]
    fn test_read_returns_raw_bytes() {
        let (_dir, library) = library_with(&["common/LICENSE.md"]);
        assert_eq!(library.read("common/LICENSE.md").unwrap(), b"common/LICENSE.md");
    }

    #[test]
    fn test_embedded_library_lists_bundled_sets() {
        let files = EmbeddedLibrary.list_files("js/**/*").unwrap();

        assert!(files.contains(&"js/package.json".to_string()));
        assert!(files.contains(&"js/src/_PLACEHOLDER_.js".to_string()));
        assert!(files.iter().all(|f| f.starts_with("js/")));
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_embedded_library_reads_manifest() {
        let manifest = EmbeddedLibrary.read("template.yaml").unwrap();
        assert!(String::from_utf8(manifest).unwrap().contains("version:"));

        assert!(matches!(
            EmbeddedLibrary.read("js/missing.js"),
            Err(GeneratorError::TemplateNotFound { source: None, .. })
        ));
    }
}
