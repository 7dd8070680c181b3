//! Generator Core - template selection and rendering for CKEditor 5 packages
//!
//! Given a package name and a few options, the generator resolves dependency
//! versions, then copies and renders a template tree into a new directory.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Version resolution ([`versions`]) and the template
//!   renderer ([`templates`]), both driven through injected collaborators
//! - **Layer 2: Workflow Orchestration** - [`workflow::generate_package`] wires the
//!   registry, the template library on disk and the post-generation commands
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use generator_core::templates::{DirectoryLibrary, FsSink, JinjaEngine, Renderer};
//! use generator_core::ConsoleLogger;
//!
//! let library = DirectoryLibrary::new("templates");
//! let logger = ConsoleLogger::new(true);
//! let files = Renderer::new(&library, &JinjaEngine::new(), &FsSink, &logger).render(&options)?;
//! ```

pub mod error;
pub mod logger;
pub mod options;
pub mod package;
pub mod runtime;
pub mod templates;
pub mod versions;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use error::{GeneratorError, Result};
pub use logger::{ConsoleLogger, Logger};
pub use options::{GenerationOptions, PackageManager, Timestamp};
pub use templates::{Layout, OutputFile, Renderer, Variant};
pub use versions::{VersionMap, VersionResolver};

#[cfg(feature = "tui")]
pub use tui::run;
