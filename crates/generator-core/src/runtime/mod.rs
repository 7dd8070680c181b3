//! Post-generation steps run in the new package directory
//!
//! This module provides:
//! - Dependency installation with the chosen package manager
//! - Git repository initialization

pub mod process;

pub use process::{init_git_repository, install_dependencies};
