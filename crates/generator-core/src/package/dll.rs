//! DLL build configuration handed through to the package templates

use super::name::FormattedNames;
use serde::Serialize;

/// Settings for the `dll:build` script. The generator never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DllConfiguration {
    /// Global variable the DLL bundle is exposed under
    pub library: String,
    /// Output file name of the DLL bundle
    pub file_name: String,
}

impl DllConfiguration {
    pub fn new(names: &FormattedNames, global_name: Option<&str>) -> Self {
        Self {
            library: global_name
                .map(str::to_string)
                .unwrap_or_else(|| names.package.camel_case.clone()),
            file_name: format!("{}.js", names.package.lower_case_merged),
        }
    }

    /// The opaque form stored in the generation options
    pub fn into_value(self) -> serde_json::Value {
        serde_json::json!({
            "library": self.library,
            "fileName": self.file_name,
        })
    }
}
