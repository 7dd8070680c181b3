//! Template set selection by programming language and installation methods

use std::fmt;

/// Directory holding files shared by every template set
pub const COMMON_DIR: &str = "common";

/// Source language of the generated package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, serde::Serialize)]
pub enum Variant {
    /// JavaScript sources
    #[value(name = "js")]
    #[serde(rename = "js")]
    Scripted,
    /// TypeScript sources
    #[value(name = "ts")]
    #[serde(rename = "ts")]
    Typed,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Scripted, Variant::Typed];

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Scripted => "JavaScript",
            Variant::Typed => "TypeScript",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which installation methods the generated package supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, serde::Serialize)]
pub enum Layout {
    /// Only the current installation methods
    #[value(name = "current")]
    #[serde(rename = "current")]
    Standard,
    /// Current and legacy installation methods
    #[value(name = "current-and-legacy")]
    #[serde(rename = "current-and-legacy")]
    Legacy,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Standard, Layout::Legacy];

    pub fn display_name(&self) -> &'static str {
        match self {
            Layout::Standard => "Current installation methods",
            Layout::Legacy => "Current and legacy installation methods",
        }
    }
}

/// Directories a template set is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSet {
    pub template_dir: &'static str,
    pub common_dir: &'static str,
}

impl TemplateSet {
    pub fn select(variant: Variant, layout: Layout) -> TemplateSet {
        let template_dir = match (variant, layout) {
            (Variant::Scripted, Layout::Standard) => "js",
            (Variant::Scripted, Layout::Legacy) => "js-legacy",
            (Variant::Typed, Layout::Standard) => "ts",
            (Variant::Typed, Layout::Legacy) => "ts-legacy",
        };
        TemplateSet {
            template_dir,
            common_dir: COMMON_DIR,
        }
    }

    /// Every directory a complete template library has to provide
    pub fn required_dirs() -> Vec<&'static str> {
        let mut dirs = vec![COMMON_DIR];
        for variant in Variant::ALL {
            for layout in Layout::ALL {
                dirs.push(Self::select(variant, layout).template_dir);
            }
        }
        dirs
    }
}
