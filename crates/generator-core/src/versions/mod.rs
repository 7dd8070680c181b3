//! Dependency version resolution
//!
//! Every generation run resolves a fresh [`VersionMap`]: the latest published
//! version of each CKEditor 5 package the templates depend on, plus the
//! package-tools reference, which points at a local checkout in dev mode.

pub mod registry;

use crate::error::Result;
use crate::logger::Logger;
use semver::Version;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

pub use registry::{RegistryClient, VersionLookup};

/// Directory name of the package-tools checkout used in dev mode
pub const PACKAGE_TOOLS_DIR: &str = "ckeditor5-package-tools";

/// Symbolic names the templates use to reference dependency versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageKey {
    Ckeditor5,
    Ckeditor5PremiumFeatures,
    Ckeditor5Inspector,
    Ckeditor5DevBuildTools,
    EslintConfigCkeditor5,
    StylelintConfigCkeditor5,
    PackageTools,
}

impl PackageKey {
    pub const ALL: [PackageKey; 7] = [
        PackageKey::Ckeditor5,
        PackageKey::Ckeditor5PremiumFeatures,
        PackageKey::Ckeditor5Inspector,
        PackageKey::Ckeditor5DevBuildTools,
        PackageKey::EslintConfigCkeditor5,
        PackageKey::StylelintConfigCkeditor5,
        PackageKey::PackageTools,
    ];

    /// Name of the package on npm
    pub fn npm_name(&self) -> &'static str {
        match self {
            PackageKey::Ckeditor5 => "ckeditor5",
            PackageKey::Ckeditor5PremiumFeatures => "ckeditor5-premium-features",
            PackageKey::Ckeditor5Inspector => "@ckeditor/ckeditor5-inspector",
            PackageKey::Ckeditor5DevBuildTools => "@ckeditor/ckeditor5-dev-build-tools",
            PackageKey::EslintConfigCkeditor5 => "eslint-config-ckeditor5",
            PackageKey::StylelintConfigCkeditor5 => "stylelint-config-ckeditor5",
            PackageKey::PackageTools => "@ckeditor/ckeditor5-package-tools",
        }
    }
}

/// A resolved dependency version as written into `package.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// `41.2.0`
    Exact(Version),
    /// `^41.2.0`
    Caret(Version),
    /// `file:/abs/path`, always with forward slashes
    Local(String),
}

impl VersionSpec {
    /// Reference to a local directory, usable on every OS
    pub fn local(path: &Path) -> Self {
        Self::Local(path.to_string_lossy().replace('\\', "/"))
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Exact(version) => write!(f, "{}", version),
            VersionSpec::Caret(version) => write!(f, "^{}", version),
            VersionSpec::Local(path) => write!(f, "file:{}", path),
        }
    }
}

impl Serialize for VersionSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Versions for one generation run. Keys missing from the map are simply
/// undefined for the templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionMap(BTreeMap<PackageKey, VersionSpec>);

impl VersionMap {
    pub fn get(&self, key: PackageKey) -> Option<&VersionSpec> {
        self.0.get(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PackageKey, VersionSpec)> for VersionMap {
    fn from_iter<I: IntoIterator<Item = (PackageKey, VersionSpec)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolves the [`VersionMap`] through an injected lookup
pub struct VersionResolver<'a, L> {
    lookup: &'a L,
    logger: &'a dyn Logger,
    package_tools_dir: PathBuf,
}

impl<'a, L: VersionLookup> VersionResolver<'a, L> {
    pub fn new(lookup: &'a L, logger: &'a dyn Logger) -> Self {
        Self {
            lookup,
            logger,
            package_tools_dir: default_package_tools_dir(),
        }
    }

    /// Use another package-tools checkout for dev mode
    pub fn with_package_tools_dir(mut self, dir: PathBuf) -> Self {
        self.package_tools_dir = dir;
        self
    }

    /// Look up every dependency. The first failed lookup aborts the run.
    pub async fn resolve(&self, dev_mode: bool) -> Result<VersionMap> {
        self.logger
            .process("Collecting the latest CKEditor 5 packages versions...");

        let mut versions = BTreeMap::new();
        for key in PackageKey::ALL {
            let spec = match key {
                PackageKey::PackageTools if dev_mode => {
                    VersionSpec::local(&normalize(&self.package_tools_dir))
                }
                PackageKey::PackageTools => {
                    VersionSpec::Caret(self.lookup.latest_version(key.npm_name()).await?)
                }
                _ => VersionSpec::Exact(self.lookup.latest_version(key.npm_name()).await?),
            };
            versions.insert(key, spec);
        }

        Ok(VersionMap(versions))
    }
}

/// Package-tools checkout next to this repository
fn default_package_tools_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("..")
        .join(PACKAGE_TOOLS_DIR)
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
