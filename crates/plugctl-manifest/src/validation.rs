//! Plugin name checks

/// Whether `name` can be used as a single file name inside the layout
///
/// Rejects empty names, `.`/`..`, and anything containing a path separator
/// of the host platform, so a lookup can never leave the receipts or index
/// directories. `\` only separates paths on Windows.
pub fn is_safe_plugin_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.chars().any(is_separator)
}

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}
