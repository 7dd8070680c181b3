//! Options describing one generation run

use crate::package::FormattedNames;
use crate::templates::{Layout, TemplateSet, Variant};
use crate::versions::VersionMap;
use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Package manager used in the generated scripts and for installing dependencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Render start time as exposed to templates (`{{ now.year }}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub iso: String,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from(chrono::Local::now())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp
where
    Tz::Offset: fmt::Display,
{
    fn from(time: DateTime<Tz>) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            iso: time.to_rfc3339(),
        }
    }
}

/// Everything the renderer needs for one run. Built once by the caller.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub package_name: String,
    pub variant: Variant,
    pub layout: Layout,
    pub formatted_names: FormattedNames,
    pub package_manager: PackageManager,
    /// Root directory the package is generated into
    pub destination: PathBuf,
    pub package_versions: VersionMap,
    /// Passed to the templates untouched
    pub dll_configuration: serde_json::Value,
    pub now: Timestamp,
}

impl GenerationOptions {
    pub fn template_set(&self) -> TemplateSet {
        TemplateSet::select(self.variant, self.layout)
    }

    /// Variables available to every template
    pub fn template_context(&self) -> serde_json::Value {
        serde_json::json!({
            "packageName": self.package_name,
            "packageVersions": self.package_versions,
            "packageManager": self.package_manager,
            "formattedNames": self.formatted_names,
            "programmingLanguage": self.variant,
            "installationMethods": self.layout,
            "dllConfiguration": self.dll_configuration,
            "now": self.now,
        })
    }
}
