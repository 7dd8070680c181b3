//! Destination path computation for template files

use std::path::{Path, PathBuf};

/// Token in `src/` file names replaced with the plugin name
pub const PLACEHOLDER_TOKEN: &str = "_PLACEHOLDER_";

/// Extension appended to templates that must not be treated as live source
const TEMPLATE_TEXT_EXTENSION: &str = ".txt";

/// Map a library path (`js/src/_PLACEHOLDER_.js`) to its place under `destination`.
///
/// The leading template-set segment is dropped, placeholders inside `src/` are
/// replaced with `plugin_name` and a trailing `.txt` after a real extension is
/// removed.
pub fn destination_path(template_path: &str, plugin_name: &str, destination: &Path) -> PathBuf {
    let segments: Vec<&str> = template_path.split('/').filter(|s| !s.is_empty()).skip(1).collect();
    let in_src = segments.first() == Some(&"src");
    let last = segments.len().saturating_sub(1);

    let mut path = destination.to_path_buf();
    for (index, segment) in segments.iter().enumerate() {
        let mut segment = if in_src && index > 0 {
            segment.replace(PLACEHOLDER_TOKEN, plugin_name)
        } else {
            segment.to_string()
        };

        if index == last {
            segment = strip_template_extension(&segment).to_string();
        }

        path.push(segment);
    }
    path
}

/// `foo.js.txt` -> `foo.js`, while `notes.txt` stays as is
fn strip_template_extension(file_name: &str) -> &str {
    match file_name.strip_suffix(TEMPLATE_TEXT_EXTENSION) {
        Some(stem) if Path::new(stem).extension().is_some() => stem,
        _ => file_name,
    }
}
