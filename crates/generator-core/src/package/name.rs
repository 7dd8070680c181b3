//! Package and plugin name validation and formatting

use crate::error::{GeneratorError, Result};
use serde::Serialize;

/// Every generated package is named `@<scope>/ckeditor5-<name>`
pub const PACKAGE_PREFIX: &str = "ckeditor5-";

/// npm refuses longer package names
const MAX_PACKAGE_NAME_LENGTH: usize = 214;

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
}

/// Check that `name` is a scoped CKEditor 5 package name
pub fn validate_package_name(name: &str) -> Result<()> {
    let invalid = |reason| GeneratorError::InvalidPackageName {
        name: name.to_string(),
        reason,
    };

    if name.len() > MAX_PACKAGE_NAME_LENGTH {
        return Err(invalid("the name is longer than 214 characters"));
    }

    let scoped = name
        .strip_prefix('@')
        .ok_or_else(|| invalid("the name must start with a scope, e.g. @scope/ckeditor5-name"))?;
    let (scope, unscoped) = scoped
        .split_once('/')
        .ok_or_else(|| invalid("the scope must be followed by '/'"))?;

    match scope.chars().next() {
        None => return Err(invalid("the scope cannot be empty")),
        Some('.' | '_') => return Err(invalid("the scope cannot start with '.' or '_'")),
        Some(_) => {}
    }
    if !scope.chars().all(is_name_char) {
        return Err(invalid(
            "the scope may contain only lowercase letters, digits and '-._~'",
        ));
    }

    let feature = unscoped
        .strip_prefix(PACKAGE_PREFIX)
        .ok_or_else(|| invalid("the name after the scope must start with 'ckeditor5-'"))?;
    if feature.is_empty() {
        return Err(invalid("the name after 'ckeditor5-' cannot be empty"));
    }
    if !feature.chars().all(is_name_char) {
        return Err(invalid(
            "the name may contain only lowercase letters, digits and '-._~'",
        ));
    }

    Ok(())
}

/// Check a user-supplied plugin class name
pub fn validate_plugin_name(name: &str) -> Result<()> {
    let invalid = |reason| GeneratorError::InvalidPluginName {
        name: name.to_string(),
        reason,
    };

    match name.chars().next() {
        None => Err(invalid("the name cannot be empty")),
        Some(c) if !c.is_ascii_alphabetic() => Err(invalid("the name must start with a letter")),
        _ if !name.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Err(invalid("the name may contain only letters and digits"))
        }
        _ => Ok(()),
    }
}

/// `@foo/ckeditor5-featurename` -> `ckeditor5-featurename`
pub fn unscoped_name(package_name: &str) -> &str {
    package_name
        .rsplit_once('/')
        .map_or(package_name, |(_, name)| name)
}

/// `@foo/ckeditor5-featurename` -> `featurename`
pub fn feature_name(package_name: &str) -> &str {
    let unscoped = unscoped_name(package_name);
    unscoped.strip_prefix(PACKAGE_PREFIX).unwrap_or(unscoped)
}

/// The casings of a single name that templates can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedName {
    pub raw: String,
    pub spaced_out: String,
    pub camel_case: String,
    pub pascal_case: String,
    pub lower_case_merged: String,
}

impl FormattedName {
    pub fn new(raw: &str) -> Self {
        let words = split_words(raw);
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let spaced_out = capitalize(&lower.join(" "));
        let pascal_case: String = lower.iter().map(|w| capitalize(w)).collect();
        let camel_case = match lower.split_first() {
            Some((first, rest)) => {
                let mut camel = first.clone();
                camel.extend(rest.iter().map(|w| capitalize(w)));
                camel
            }
            None => String::new(),
        };

        Self {
            raw: raw.to_string(),
            spaced_out,
            camel_case,
            pascal_case,
            lower_case_merged: lower.concat(),
        }
    }
}

/// Name forms for the package and its default plugin class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedNames {
    pub package: FormattedName,
    pub plugin: FormattedName,
}

impl FormattedNames {
    /// Derive both name sets. Without an explicit plugin name the plugin is
    /// named after the package in PascalCase.
    pub fn new(package_name: &str, plugin_name: Option<&str>) -> Self {
        let package = FormattedName::new(feature_name(package_name));
        let plugin = match plugin_name {
            Some(name) => FormattedName::new(name),
            None => FormattedName::new(&package.pascal_case),
        };
        Self { package, plugin }
    }
}

/// Split on separators and on case boundaries (`fooBar`, `HTMLEmbed`)
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
