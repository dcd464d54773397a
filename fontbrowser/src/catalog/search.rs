//! Case-insensitive substring search over catalog names.

/// Return the names whose lowercase form contains the lowercase `query`.
///
/// Catalog order is preserved and an empty query returns every name.
pub fn filter<'a>(names: &[&'a str], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return names.to_vec();
    }

    let query_lower = query.to_lowercase();
    names
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&query_lower))
        .collect()
}
