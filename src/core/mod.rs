//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Display fragments produced by formatters
//! - Rendering functions for different output formats
//! - Document loading and typed data errors
//! - Data path resolution
//! - Logging setup
//! - Common utilities

pub mod error;
pub mod fragment;
pub mod loader;
pub mod logging;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
