//! Project category filtering.
//!
//! The same rule runs in the browser (see the interaction script) and on the
//! server when a page is requested with `?filter=`.

use crate::models::ProjectEntry;

/// Filter value that shows every project.
pub const ALL_FILTER: &str = "all";

/// Separator used in a card's `data-categories` attribute.
pub const CATEGORY_DELIMITER: &str = ",";

/// Whether a project with `categories` is shown under `filter`.
pub fn matches<S: AsRef<str>>(categories: &[S], filter: &str) -> bool {
    filter == ALL_FILTER || categories.iter().any(|c| c.as_ref() == filter)
}

pub fn project_visible(project: &ProjectEntry, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| matches(&project.categories, f))
}

/// Normalize a user-supplied filter value; empty means no filter.
pub fn normalize(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}
