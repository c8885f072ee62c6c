//! Guide module - The travel-guide document
//!
//! Each section carries a content payload whose shape depends on its key.
//! The renderer maps every known key to its own formatter and anything
//! else to a placeholder.

pub mod api;
pub mod model;
pub mod render;
