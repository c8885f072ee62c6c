//! Category browsing
//!
//! Browsing a category is a search for the first word of its name, so the
//! results come back scored and ordered like any other query.

use crate::catalog::model::{Catalog, Category};

/// Query used when browsing a category: first word of its name, lowercased
pub fn browse_query(category: &Category) -> String {
    category
        .name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Find a category by 1-based position, exact name, or name prefix (case-insensitive)
pub fn find_category<'a>(catalog: &'a Catalog, selector: &str) -> Option<(usize, &'a Category)> {
    let selector = selector.trim();
    if selector.is_empty() {
        return None;
    }

    if let Ok(position) = selector.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| catalog.categories.get(index).map(|c| (index, c)));
    }

    let wanted = selector.to_lowercase();
    let indexed = move || catalog.categories.iter().enumerate();

    indexed()
        .find(|(_, c)| c.name.to_lowercase() == wanted)
        .or_else(|| indexed().find(|(_, c)| c.name.to_lowercase().starts_with(&wanted)))
}
