//! Catalog API - search, categories and browse operations

use anyhow::Result;
use std::num::NonZeroUsize;

use crate::catalog::browse::{browse_query, find_category};
use crate::catalog::card::article_card;
use crate::catalog::model::Catalog;
use crate::catalog::search::search;
use crate::core::fragment::{Blocks, Fragment, Tone};
use crate::core::loader::load_catalog;
use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::paths::DataPaths;
use crate::core::render::{RenderConfig, Renderer};

/// Example queries suggested when nothing matches
const SUGGESTIONS: &str = "computer, telefono, frigorifero";

/// Search results as result items, one card per hit
pub fn search_results(catalog: &Catalog, query: &str, limit: Option<NonZeroUsize>) -> ResultSet {
    let hits = search(catalog, query);

    if hits.is_empty() {
        let mut result_set = ResultSet::new();
        result_set.push(no_results(query));
        return result_set;
    }

    let mut result_set: ResultSet = hits
        .into_iter()
        .map(|hit| {
            ResultItem::article(
                article_card(hit.article, hit.category),
                hit.category.name.as_str(),
                hit.score,
            )
        })
        .collect();

    if let Some(limit) = limit {
        result_set.limit(limit);
    }
    result_set
}

/// The "no results" notice, distinct from the category overview
fn no_results(query: &str) -> ResultItem {
    let mut blocks = Blocks::new();
    blocks
        .note(
            Tone::Neutral,
            Some(format!("Non ho trovato articoli per \"{}\"", query)),
        )
        .note(
            Tone::Muted,
            Some(format!(
                "Prova con termini diversi come: {}, ecc.",
                SUGGESTIONS
            )),
        );
    ResultItem::notice(Fragment::new("Nessun risultato", Some("🔍"), blocks))
}

/// One item per category, in catalog order
pub fn category_results(catalog: &Catalog) -> ResultSet {
    catalog
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            ResultItem::category((index + 1).to_string(), category.name.as_str(), &category.icon)
                .with_data(serde_json::json!({
                    "articles": category.articles.len(),
                    "query": browse_query(category),
                }))
        })
        .collect()
}

/// Browse one category through the search engine
pub fn browse_results(catalog: &Catalog, selector: &str, limit: Option<NonZeroUsize>) -> ResultSet {
    match find_category(catalog, selector) {
        Some((_, category)) => search_results(catalog, &browse_query(category), limit),
        None => {
            let mut result_set = ResultSet::new();
            result_set.push(ResultItem::error(ItemError::new(
                "UNKNOWN_CATEGORY",
                format!("No category matches '{}'", selector),
            )));
            result_set
        }
    }
}

fn with_catalog(paths: &DataPaths, f: impl FnOnce(&Catalog) -> ResultSet) -> ResultSet {
    match load_catalog(&paths.catalog) {
        Ok(catalog) => f(&catalog),
        Err(err) => std::iter::once(err.to_result_item()).collect(),
    }
}

/// Run the search command. A blank query falls back to the category overview.
pub fn run_search(
    paths: &DataPaths,
    query: &str,
    limit: Option<NonZeroUsize>,
    config: RenderConfig,
) -> Result<()> {
    let query = query.trim();
    let result_set = with_catalog(paths, |catalog| {
        if query.is_empty() {
            category_results(catalog)
        } else {
            search_results(catalog, query, limit)
        }
    });

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

/// Run the categories command
pub fn run_categories(paths: &DataPaths, config: RenderConfig) -> Result<()> {
    let result_set = with_catalog(paths, category_results);

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

/// Run the browse command
pub fn run_browse(
    paths: &DataPaths,
    selector: &str,
    limit: Option<NonZeroUsize>,
    config: RenderConfig,
) -> Result<()> {
    let result_set = with_catalog(paths, |catalog| browse_results(catalog, selector, limit));

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}
