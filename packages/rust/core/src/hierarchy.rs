//! Category hierarchy builder.
//!
//! Turns an ordered list of category names into the level-indexed breadcrumb
//! the search UI uses for hierarchical faceting:
//!
//! ```text
//! ["Equity", "Large Cap"]  ->  lvl0: "Equity"
//!                              lvl1: "Equity > Large Cap"
//! ```

use contentindex_shared::CategoryHierarchy;

/// Build a breadcrumb mapping from ordered category names.
///
/// Level 0 is the first name alone; level `i` is level `i - 1`, the
/// separator, then name `i`. An empty list gives an empty mapping.
pub fn build_breadcrumb<S: AsRef<str>>(
    names: &[S],
    level_prefix: &str,
    separator: &str,
) -> CategoryHierarchy {
    let mut levels = CategoryHierarchy::new();
    let mut trail = String::new();

    for (depth, name) in names.iter().enumerate() {
        if depth > 0 {
            trail.push_str(separator);
        }
        trail.push_str(name.as_ref());
        levels.insert(format!("{level_prefix}{depth}"), trail.clone());
    }

    levels
}

/// Flat category list: asset class, then category, with empty names dropped.
pub fn category_names(asset_class: &str, category: Option<&str>) -> Vec<String> {
    std::iter::once(asset_class)
        .chain(category)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
