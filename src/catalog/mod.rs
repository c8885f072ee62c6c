//! Catalog module - The customs article catalog
//!
//! Provides:
//! - model: categories and articles as loaded from the catalog document
//! - search: scored substring search over every article
//! - card: article display fragments
//! - browse: category lookup and browse queries
//! - api: search/categories/browse operations

pub mod api;
pub mod browse;
pub mod card;
pub mod model;
pub mod search;
