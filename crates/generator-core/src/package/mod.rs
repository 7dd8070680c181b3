//! Package identity: name validation, name casings and DLL settings

pub mod dll;
pub mod name;

pub use dll::DllConfiguration;
pub use name::{
    feature_name, unscoped_name, validate_package_name, validate_plugin_name, FormattedName,
    FormattedNames,
};
