//! Checks module - Health and integrity of the data documents
//!
//! Provides:
//! - doctor: presence, size, timestamps, hashes and entry counts
//! - lint: duplicates, empty categories, unknown keys, malformed contacts

pub mod doctor;
pub mod lint;
