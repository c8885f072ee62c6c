//! Catalog search engine
//!
//! Case-insensitive substring matching over every article of every category.
//! There is no index: each call scans the whole catalog, keeps no state and
//! can be repeated freely.
//!
//! Scoring is additive:
//! - primary name contains the query: +10
//! - each synonym containing the query: +8
//! - secondary name contains the query: +5
//! - owning category name contains the query: +3

use crate::catalog::model::{Article, Catalog, Category};

pub const PRIMARY_NAME_WEIGHT: u32 = 10;
pub const SYNONYM_WEIGHT: u32 = 8;
pub const SECONDARY_NAME_WEIGHT: u32 = 5;
pub const CATEGORY_NAME_WEIGHT: u32 = 3;

/// A ranked match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub article: &'a Article,
    pub category: &'a Category,
    pub score: u32,
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Score one article against an already-lowercased query
pub fn score_article(article: &Article, category: &Category, needle: &str) -> u32 {
    let mut score = 0;

    if contains(&article.name, needle) {
        score += PRIMARY_NAME_WEIGHT;
    }

    let synonym_hits = article
        .synonyms
        .iter()
        .filter(|synonym| contains(synonym, needle))
        .count() as u32;
    score += synonym_hits * SYNONYM_WEIGHT;

    if article
        .secondary_name
        .as_deref()
        .is_some_and(|name| contains(name, needle))
    {
        score += SECONDARY_NAME_WEIGHT;
    }

    if contains(&category.name, needle) {
        score += CATEGORY_NAME_WEIGHT;
    }

    score
}

/// Search the catalog and return matches by descending score.
///
/// Ties keep catalog order (category, then article). A blank query matches nothing.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<SearchHit<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    let mut hits: Vec<SearchHit<'a>> = catalog
        .articles()
        .filter_map(|(category, article)| {
            let score = score_article(article, category, &needle);
            (score > 0).then_some(SearchHit {
                article,
                category,
                score,
            })
        })
        .collect();

    // Stable: equal scores stay in scan order
    hits.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(query, hits = hits.len(), "catalog search");
    hits
}
