//! dogana - customs allowances and travel-guide notes, offline
//!
//! The library is the read-only core:
//! - catalog: customs article catalog, scored search, article cards, category browsing
//! - guide: travel-guide document and per-section formatters
//! - core: unified result model, display fragments, loading, output rendering
//! - checks: document health (doctor) and integrity linting
//!
//! The `dogana` binary is a thin presentation layer over it.

pub mod catalog;
pub mod checks;
pub mod cli;
pub mod core;
pub mod guide;
