//! Template library manifest (`template.yaml` at the library root)

use super::library::TemplateLibrary;
use super::variant::TemplateSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the manifest inside the library root
pub const MANIFEST_FILE: &str = "template.yaml";

/// Describes a template library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryManifest {
    /// Display name of the library
    pub name: String,

    /// Description of the generated package
    #[serde(default)]
    pub description: String,

    /// Oldest generator version able to render this library
    pub version: String,
}

impl LibraryManifest {
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse template library manifest")
    }

    /// Read `template.yaml` from the library root
    pub fn load(library: &dyn TemplateLibrary) -> Result<Self> {
        let raw = library
            .read(MANIFEST_FILE)
            .with_context(|| format!("Failed to read {}", MANIFEST_FILE))?;
        let content = String::from_utf8(raw)
            .with_context(|| format!("{} is not valid UTF-8", MANIFEST_FILE))?;
        Self::parse(&content)
    }
}

/// Template-set directories without any file in the library
pub fn missing_dirs(library: &dyn TemplateLibrary) -> Result<Vec<&'static str>> {
    let mut missing = Vec::new();
    for dir in TemplateSet::required_dirs() {
        if library.list_files(&format!("{}/**/*", dir))?.is_empty() {
            missing.push(dir);
        }
    }
    Ok(missing)
}
