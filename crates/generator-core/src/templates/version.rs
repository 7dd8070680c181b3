//! Generator and template library compatibility

use semver::Version;

/// Warn when the template library expects a newer generator.
/// Unparseable versions are not compared.
pub fn check_compatibility(
    generator_version: &str,
    library_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let generator = Version::parse(generator_version).ok()?;
    let library = Version::parse(library_version.trim_start_matches('v')).ok()?;

    if generator < library {
        Some(format!(
            "Warning: These templates require package generator {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            library_version, generator_version, upgrade_command
        ))
    } else {
        None
    }
}
