//! Template selection, rendering and writing

use super::engine::TemplateEngine;
use super::library::TemplateLibrary;
use super::paths::destination_path;
use super::sink::OutputSink;
use super::variant::TemplateSet;
use crate::error::{GeneratorError, Result};
use crate::logger::Logger;
use crate::options::GenerationOptions;
use std::collections::HashMap;
use std::path::PathBuf;

/// Where a template file was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    /// Shared by every template set
    Common,
    /// Specific to the selected variant and layout
    Variant,
}

/// A template selected for the current run. Content is read when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Library-relative path, including the template-set directory
    pub path: String,
    pub category: SourceCategory,
}

/// Content of a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Text template after variable substitution
    Rendered(String),
    /// Non-text asset copied byte for byte
    Copied(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Rendered(text) => text.as_bytes(),
            FileContent::Copied(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Rendered(text) => Some(text),
            FileContent::Copied(_) => None,
        }
    }
}

/// A file written by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: FileContent,
}

/// Renders a template set into a destination directory
pub struct Renderer<'a> {
    library: &'a dyn TemplateLibrary,
    engine: &'a dyn TemplateEngine,
    sink: &'a dyn OutputSink,
    logger: &'a dyn Logger,
}

impl<'a> Renderer<'a> {
    pub fn new(
        library: &'a dyn TemplateLibrary,
        engine: &'a dyn TemplateEngine,
        sink: &'a dyn OutputSink,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            library,
            engine,
            sink,
            logger,
        }
    }

    /// Common files first, then the variant's files, each group sorted by path
    pub fn select(&self, set: TemplateSet) -> Result<Vec<TemplateFile>> {
        let mut files = Vec::new();
        for (dir, category) in [
            (set.common_dir, SourceCategory::Common),
            (set.template_dir, SourceCategory::Variant),
        ] {
            let mut paths = self.library.list_files(&format!("{}/**/*", dir))?;
            paths.sort();
            files.extend(paths.into_iter().map(|path| TemplateFile { path, category }));
        }
        Ok(files)
    }

    /// Pair every selected template with its destination. Nothing is
    /// written when two templates map onto the same path.
    pub fn plan(&self, options: &GenerationOptions) -> Result<Vec<(TemplateFile, PathBuf)>> {
        let plugin_name = &options.formatted_names.plugin.lower_case_merged;

        let mut claimed: HashMap<PathBuf, String> = HashMap::new();
        let mut planned = Vec::new();
        for template in self.select(options.template_set())? {
            let path = destination_path(&template.path, plugin_name, &options.destination);
            if let Some(first) = claimed.insert(path.clone(), template.path.clone()) {
                return Err(GeneratorError::DuplicateDestination {
                    path,
                    first,
                    second: template.path,
                });
            }
            planned.push((template, path));
        }

        Ok(planned)
    }

    /// Render every selected template and write it out, in selection order.
    /// Stops at the first failure; files written before it are left in place.
    pub fn render(&self, options: &GenerationOptions) -> Result<Vec<OutputFile>> {
        self.logger.process("Copying files...");

        let context = options.template_context();

        let mut written = Vec::new();
        for (template, path) in self.plan(options)? {
            let raw = self.library.read(&template.path)?;
            let content = match String::from_utf8(raw) {
                Ok(text) => {
                    FileContent::Rendered(self.engine.render(&template.path, &text, &context)?)
                }
                Err(err) => FileContent::Copied(err.into_bytes()),
            };

            if let Some(parent) = path.parent() {
                self.sink
                    .ensure_directory(parent)
                    .map_err(|source| GeneratorError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
            self.sink
                .write(&path, content.as_bytes())
                .map_err(|source| GeneratorError::Write {
                    path: path.clone(),
                    source,
                })?;
            self.logger.verbose_info(&path.display().to_string());

            written.push(OutputFile { path, content });
        }

        Ok(written)
    }
}
