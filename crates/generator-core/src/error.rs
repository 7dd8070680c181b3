//! Error taxonomy for package generation

use std::path::PathBuf;

/// Errors produced while resolving versions, rendering templates or writing output
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Registry or network failure while resolving dependency versions
    #[error("Failed to resolve the version of '{package}': {reason}")]
    VersionLookup { package: String, reason: String },

    /// A template listed by the library could not be read
    #[error("Template not found: {path}")]
    TemplateNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed template, or a missing variable when rendering strictly
    #[error("Failed to render template '{name}': {source}")]
    TemplateRender {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The output sink failed to write a file or create a directory
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two templates of one run map onto the same output file
    #[error("Templates '{first}' and '{second}' would both be written to {}", path.display())]
    DuplicateDestination {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// The template library itself could not be listed
    #[error("Failed to list template files matching '{pattern}': {reason}")]
    Listing { pattern: String, reason: String },

    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: &'static str },

    #[error("Invalid plugin name '{name}': {reason}")]
    InvalidPluginName { name: String, reason: &'static str },

    #[error("Cannot create the package directory, {} already exists", .0.display())]
    DirectoryExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

impl GeneratorError {
    pub(crate) fn version_lookup(package: &str, reason: impl ToString) -> Self {
        Self::VersionLookup {
            package: package.to_string(),
            reason: reason.to_string(),
        }
    }
}
