//! In-memory collaborators and fixtures shared by the unit tests

use crate::error::{GeneratorError, Result};
use crate::logger::Logger;
use crate::options::{GenerationOptions, PackageManager, Timestamp};
use crate::package::{DllConfiguration, FormattedNames};
use crate::templates::{Layout, OutputSink, TemplateLibrary, Variant};
use crate::versions::registry::parse_version;
use crate::versions::{PackageKey, VersionLookup, VersionMap, VersionSpec};
use chrono::{TimeZone, Utc};
use globset::GlobBuilder;
use semver::Version;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const PACKAGE_JSON_TEMPLATE: &str = r#"{
  "name": "{{ packageName }}",
  "license": "MIT",
  "dependencies": {
    "ckeditor5": ">={{ packageVersions.ckeditor5 }}"
  },
  "devDependencies": {
    "@ckeditor/ckeditor5-dev-build-tools": "{{ packageVersions.ckeditor5DevBuildTools }}",
    "@ckeditor/ckeditor5-autoformat": ">={{ packageVersions.ckeditor5 }}",
    "@ckeditor/ckeditor5-basic-styles": ">={{ packageVersions.ckeditor5 }}",
    "@ckeditor/ckeditor5-block-quote": ">={{ packageVersions.ckeditor5 }}",
    "@ckeditor/ckeditor5-inspector": ">={{ packageVersions.ckeditor5Inspector }}",
    "@ckeditor/ckeditor5-package-tools": "{{ packageVersions.packageTools }}",
    "eslint": "^7.32.0",
    "eslint-config-ckeditor5": ">={{ packageVersions.eslintConfigCkeditor5 }}",
    "stylelint": "^13.13.1",
    "stylelint-config-ckeditor5": ">={{ packageVersions.stylelintConfigCkeditor5 }}"
  },
  "scripts": {
    "dll:build": "ckeditor5-package-tools dll:build",
    "prepare": "{{ packageManager }} run dll:build",
    "prepublishOnly": "{{ packageManager }} run dll:build"
  }
}"#;

/// Library with the license, translations, manifest and entry point of both variants
pub fn fixture_library() -> MemoryLibrary {
    MemoryLibrary::default()
        .with(
            "common/LICENSE.md",
            "Copyright (c) {{ now.year }}. All rights reserved.\n",
        )
        .with(
            "common/lang/contexts.json",
            "{\n  \"My plugin\": \"Content for a tooltip is displayed when a user hovers the CKEditor 5 icon.\"\n}",
        )
        .with("js/package.json", PACKAGE_JSON_TEMPLATE)
        .with("js/src/index.js", "/* JS CODE */")
        .with("ts/package.json", PACKAGE_JSON_TEMPLATE)
        .with("ts/src/index.ts", "/* TS CODE */")
}

/// `@foo/ckeditor5-featurename` with a `BarBaz` plugin, generated with yarn on 1984-02-01
pub fn fixture_options() -> GenerationOptions {
    let formatted_names = FormattedNames::new("@foo/ckeditor5-featurename", Some("BarBaz"));
    let dll_configuration = DllConfiguration::new(&formatted_names, None).into_value();

    GenerationOptions {
        package_name: "@foo/ckeditor5-featurename".to_string(),
        variant: Variant::Scripted,
        layout: Layout::Standard,
        formatted_names,
        package_manager: PackageManager::Yarn,
        destination: PathBuf::from("directory/path/foo"),
        package_versions: [
            (PackageKey::Ckeditor5DevBuildTools, VersionSpec::Exact(Version::new(40, 0, 0))),
            (PackageKey::Ckeditor5, VersionSpec::Exact(Version::new(30, 0, 0))),
            (PackageKey::PackageTools, VersionSpec::Exact(Version::new(25, 0, 0))),
        ]
        .into_iter()
        .collect::<VersionMap>(),
        dll_configuration,
        now: Timestamp::from(Utc.with_ymd_and_hms(1984, 2, 1, 0, 0, 0).unwrap()),
    }
}

/// Template library held in memory. `None` content is listed but unreadable.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    files: BTreeMap<String, Option<Vec<u8>>>,
}

impl MemoryLibrary {
    pub fn with(self, path: &str, content: &str) -> Self {
        self.with_bytes(path, content.as_bytes().to_vec())
    }

    pub fn with_bytes(mut self, path: &str, content: Vec<u8>) -> Self {
        self.files.insert(path.to_string(), Some(content));
        self
    }

    pub fn listing_only(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), None);
        self
    }
}

impl TemplateLibrary for MemoryLibrary {
    fn list_files(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| GeneratorError::Listing {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?
            .compile_matcher();

        Ok(self
            .files
            .keys()
            .filter(|path| matcher.is_match(path.as_str()))
            .cloned()
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .flatten()
            .ok_or_else(|| GeneratorError::TemplateNotFound {
                path: path.to_string(),
                source: None,
            })
    }
}

/// Sink recording writes in order
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    directories: Mutex<Vec<PathBuf>>,
    fail_on: Mutex<Option<PathBuf>>,
}

impl MemorySink {
    /// Make writing `path` fail with a permission error
    pub fn fail_on(&self, path: &Path) {
        *self.fail_on.lock().unwrap() = Some(path.to_path_buf());
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, contents)| contents.clone())
    }

    pub fn directories(&self) -> Vec<PathBuf> {
        self.directories.lock().unwrap().clone()
    }
}

impl OutputSink for MemorySink {
    fn ensure_directory(&self, path: &Path) -> io::Result<()> {
        let mut directories = self.directories.lock().unwrap();
        if !directories.iter().any(|d| d == path) {
            directories.push(path.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if self.fail_on.lock().unwrap().as_deref() == Some(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.files
            .lock()
            .unwrap()
            .push((path.to_path_buf(), contents.to_vec()));
        Ok(())
    }
}

/// Logger keeping every message
#[derive(Debug, Default)]
pub struct RecordingLogger {
    process: Mutex<Vec<String>>,
    verbose: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn process_messages(&self) -> Vec<String> {
        self.process.lock().unwrap().clone()
    }

    pub fn verbose_messages(&self) -> Vec<String> {
        self.verbose.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn process(&self, message: &str) {
        self.process.lock().unwrap().push(message.to_string());
    }

    fn verbose_info(&self, message: &str) {
        self.verbose.lock().unwrap().push(message.to_string());
    }
}

/// Registry answering from a fixed table
#[derive(Debug, Default)]
pub struct StaticLookup {
    versions: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticLookup {
    pub fn new<const N: usize>(versions: [(&str, &str); N]) -> Self {
        Self {
            versions: versions
                .into_iter()
                .map(|(name, version)| (name.to_string(), version.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl VersionLookup for StaticLookup {
    async fn latest_version(&self, package: &str) -> Result<Version> {
        self.requested.lock().unwrap().push(package.to_string());
        let version = self.versions.get(package).ok_or_else(|| {
            GeneratorError::VersionLookup {
                package: package.to_string(),
                reason: "package not found in the registry".to_string(),
            }
        })?;
        parse_version(package, version)
    }
}
