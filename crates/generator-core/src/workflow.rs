//! End-to-end package generation without any prompting
//!
//! Interactive front ends collect the answers, build a [`GenerateRequest`] and
//! hand it to [`generate_package`].

use crate::error::GeneratorError;
use crate::logger::Logger;
use crate::options::{GenerationOptions, PackageManager, Timestamp};
use crate::package::{
    unscoped_name, validate_package_name, validate_plugin_name, DllConfiguration, FormattedNames,
};
use crate::runtime;
use crate::templates::manifest::{missing_dirs, LibraryManifest};
use crate::templates::{
    check_compatibility, DirectoryLibrary, EmbeddedLibrary, FsSink, JinjaEngine, Layout,
    OutputFile, Renderer, TemplateLibrary, Variant,
};
use crate::versions::{RegistryClient, VersionLookup, VersionResolver};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the template library location
pub const TEMPLATE_DIR_ENV: &str = "CKEDITOR5_TEMPLATE_DIR";

/// Shown when the template library needs a newer generator
pub const UPGRADE_COMMAND: &str = "cargo install package-generator --force";

/// Template directory named by `CKEDITOR5_TEMPLATE_DIR`, if any
pub fn template_dir_override() -> Option<PathBuf> {
    std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from)
}

/// Everything needed to generate one package
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub package_name: String,
    pub plugin_name: Option<String>,
    pub global_name: Option<String>,
    pub variant: Variant,
    pub layout: Layout,
    pub package_manager: PackageManager,
    /// Local template library; the bundled one when unset
    pub template_dir: Option<PathBuf>,
    /// Directory the package directory is created in
    pub parent_dir: PathBuf,
    /// Reference the local package-tools checkout instead of npm
    pub dev: bool,
    /// Fail on undefined template variables
    pub strict: bool,
    pub install: bool,
    pub git: bool,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        validate_package_name(&self.package_name)?;
        if let Some(plugin_name) = &self.plugin_name {
            validate_plugin_name(plugin_name)?;
        }
        Ok(())
    }

    /// `<parent>/ckeditor5-<name>`
    pub fn destination(&self) -> PathBuf {
        self.parent_dir.join(unscoped_name(&self.package_name))
    }

    pub fn formatted_names(&self) -> FormattedNames {
        FormattedNames::new(&self.package_name, self.plugin_name.as_deref())
    }

    pub fn template_library(&self) -> Box<dyn TemplateLibrary> {
        match &self.template_dir {
            Some(dir) => Box::new(DirectoryLibrary::new(dir)),
            None => Box::new(EmbeddedLibrary),
        }
    }

    /// Where the templates come from, for display
    pub fn template_source(&self) -> String {
        match &self.template_dir {
            Some(dir) => dir.display().to_string(),
            None => "the bundled template library".to_string(),
        }
    }
}

/// Outcome of a successful generation
#[derive(Debug)]
pub struct GenerationReport {
    pub destination: PathBuf,
    pub files: Vec<OutputFile>,
    /// Set when installing dependencies failed; the package itself is complete
    pub install_error: Option<String>,
    /// Set when `git init` failed
    pub git_error: Option<String>,
}

/// Verify a template library and return a compatibility warning, if any
pub fn check_library(
    library: &dyn TemplateLibrary,
    generator_version: &str,
) -> Result<Option<String>> {
    let manifest = LibraryManifest::load(library)?;

    let missing = missing_dirs(library)?;
    if !missing.is_empty() {
        anyhow::bail!(
            "Template library '{}' is missing: {}",
            manifest.name,
            missing.join(", ")
        );
    }

    Ok(check_compatibility(
        generator_version,
        &manifest.version,
        UPGRADE_COMMAND,
    ))
}

/// Create the package directory. It must not exist yet.
pub fn create_package_directory(destination: &Path, logger: &dyn Logger) -> Result<()> {
    if destination.exists() {
        return Err(GeneratorError::DirectoryExists(destination.to_path_buf()).into());
    }

    logger.process(&format!(
        "Creating the directory \"{}\"...",
        destination.display()
    ));
    std::fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create directory: {}", destination.display()))
}

/// Generate a package using the npm registry for versions
pub async fn generate_package(
    request: &GenerateRequest,
    logger: &dyn Logger,
) -> Result<GenerationReport> {
    let registry = RegistryClient::from_env(concat!(
        "ckeditor5-package-generator/",
        env!("CARGO_PKG_VERSION")
    ))?;
    generate_package_with(request, &registry, logger).await
}

/// Generate a package with the given version source
pub async fn generate_package_with<L: VersionLookup>(
    request: &GenerateRequest,
    lookup: &L,
    logger: &dyn Logger,
) -> Result<GenerationReport> {
    request.validate()?;

    let destination = request.destination();
    create_package_directory(&destination, logger)?;

    let versions = VersionResolver::new(lookup, logger)
        .resolve(request.dev)
        .await?;

    let formatted_names = request.formatted_names();
    let dll_configuration =
        DllConfiguration::new(&formatted_names, request.global_name.as_deref()).into_value();

    let options = GenerationOptions {
        package_name: request.package_name.clone(),
        variant: request.variant,
        layout: request.layout,
        formatted_names,
        package_manager: request.package_manager,
        destination: destination.clone(),
        package_versions: versions,
        dll_configuration,
        now: Timestamp::now(),
    };

    let library = request.template_library();
    let engine = if request.strict {
        JinjaEngine::strict()
    } else {
        JinjaEngine::new()
    };
    let files = Renderer::new(library.as_ref(), &engine, &FsSink, logger).render(&options)?;

    let install_error = if request.install {
        runtime::install_dependencies(&destination, request.package_manager, logger)
            .await
            .err()
            .map(|e| e.to_string())
    } else {
        None
    };

    let git_error = if request.git {
        runtime::init_git_repository(&destination, logger)
            .await
            .err()
            .map(|e| e.to_string())
    } else {
        None
    };

    Ok(GenerationReport {
        destination,
        files,
        install_error,
        git_error,
    })
}

/// Commands to run after generation
pub fn next_steps(destination: &Path, package_manager: PackageManager) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(destination) {
        let shown = current
            .as_deref()
            .and_then(|cwd| destination.strip_prefix(cwd).ok())
            .unwrap_or(destination);
        steps.push(format!("cd {}", shown.display()));
    }
    steps.push(format!("{} run start", package_manager));

    steps
}
