//! Template selection, path mapping and rendering
//!
//! This module provides:
//! - Template set selection by variant and layout
//! - Library access (listing, reading) and output sinks
//! - Destination path mapping (`_PLACEHOLDER_`, `.txt` suffixes)
//! - Rendering through a pluggable [`TemplateEngine`]
//! - Library manifest parsing and compatibility checking

pub mod engine;
pub mod library;
pub mod manifest;
pub mod paths;
pub mod renderer;
pub mod sink;
pub mod variant;
pub mod version;

pub use engine::{JinjaEngine, TemplateEngine};
pub use library::{DirectoryLibrary, EmbeddedLibrary, TemplateLibrary};
pub use manifest::LibraryManifest;
pub use paths::destination_path;
pub use renderer::{FileContent, OutputFile, Renderer, SourceCategory, TemplateFile};
pub use sink::{FsSink, OutputSink};
pub use variant::{Layout, TemplateSet, Variant};
pub use version::check_compatibility;
