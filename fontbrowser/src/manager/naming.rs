//! Path-component validation for package and file names.

/// Whether `name` can be joined onto a directory without escaping it.
///
/// Rejects empty names, `.`/`..`, and anything containing a path separator
/// or NUL.
pub fn is_safe_component(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
