//! Unified Result Model
//!
//! Every command maps what it found to this model before rendering output.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::core::fragment::Fragment;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Category,
    Article,
    Section,
    Notice,
    Status,
    Issue,
    Error,
}

/// Severity of a lint issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Last modification time (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,

    /// Content hash (XXH3 or SHA1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Whether the result list was cut short by a limit
    #[serde(default)]
    pub truncated: bool,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Icon glyph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Stable key (section id, category position, document name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Owning category name, for articles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Search relevance score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,

    /// Where this result came from (document path or location inside a document)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Short plain-text message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured display content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<Fragment>,

    /// Structured data payload (counts, statistics)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Lint severity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Metadata
    #[serde(default)]
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            title: None,
            icon: None,
            key: None,
            category: None,
            score: None,
            source: None,
            excerpt: None,
            fragment: None,
            data: None,
            severity: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a category entry
    pub fn category(key: impl Into<String>, name: impl Into<String>, icon: &str) -> Self {
        let mut item = Self::empty(Kind::Category);
        item.key = Some(key.into());
        item.title = Some(name.into());
        item.icon = Some(icon.to_string()).filter(|i| !i.is_empty());
        item
    }

    /// Create a scored article result carrying its card
    pub fn article(fragment: Fragment, category: impl Into<String>, score: u32) -> Self {
        let mut item = Self::empty(Kind::Article);
        item.title = Some(fragment.title.clone());
        item.icon = fragment.icon.clone();
        item.category = Some(category.into());
        item.score = Some(score);
        item.fragment = Some(fragment);
        item
    }

    /// Create a rendered guide section
    pub fn section(key: impl Into<String>, fragment: Fragment) -> Self {
        let mut item = Self::empty(Kind::Section);
        item.key = Some(key.into());
        item.title = Some(fragment.title.clone());
        item.icon = fragment.icon.clone();
        item.fragment = Some(fragment);
        item
    }

    /// Create an informational notice (e.g. "no results")
    pub fn notice(fragment: Fragment) -> Self {
        let mut item = Self::empty(Kind::Notice);
        item.title = Some(fragment.title.clone());
        item.icon = fragment.icon.clone();
        item.fragment = Some(fragment);
        item
    }

    /// Create a status line
    pub fn status(key: impl Into<String>, excerpt: impl Into<String>) -> Self {
        let mut item = Self::empty(Kind::Status);
        item.key = Some(key.into());
        item.excerpt = Some(excerpt.into());
        item
    }

    /// Create a lint issue
    pub fn issue(severity: Severity, error: ItemError, source: impl Into<String>) -> Self {
        let mut item = Self::empty(Kind::Issue);
        item.severity = Some(severity);
        item.source = Some(source.into());
        item.excerpt = Some(error.message.clone());
        item.errors.push(error);
        item
    }

    /// Create a new error result
    pub fn error(error: ItemError) -> Self {
        let mut item = Self::empty(Kind::Error);
        item.excerpt = Some(error.message.clone());
        item.errors.push(error);
        item
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    /// Keep at most `limit` items, flagging the last one kept when anything was dropped
    pub fn limit(&mut self, limit: NonZeroUsize) {
        if self.items.len() > limit.get() {
            self.items.truncate(limit.get());
            if let Some(last) = self.items.last_mut() {
                last.meta.truncated = true;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fragment::Blocks;

    fn card(title: &str) -> Fragment {
        Fragment::new(title, Some("💻"), Blocks::new())
    }

    #[test]
    fn test_result_item_category() {
        let item = ResultItem::category("1", "Elettronica", "💻");
        assert_eq!(item.kind, Kind::Category);
        assert_eq!(item.key.as_deref(), Some("1"));
        assert_eq!(item.title.as_deref(), Some("Elettronica"));
        assert_eq!(item.icon.as_deref(), Some("💻"));
    }

    #[test]
    fn test_result_item_category_blank_icon() {
        let item = ResultItem::category("1", "Varie", "");
        assert!(item.icon.is_none());
    }

    #[test]
    fn test_result_item_article() {
        let item = ResultItem::article(card("Computer portatile"), "Elettronica", 10);
        assert_eq!(item.kind, Kind::Article);
        assert_eq!(item.title.as_deref(), Some("Computer portatile"));
        assert_eq!(item.category.as_deref(), Some("Elettronica"));
        assert_eq!(item.score, Some(10));
        assert!(item.fragment.is_some());
    }

    #[test]
    fn test_result_item_section() {
        let item = ResultItem::section("elettricita", card("Elettricità"));
        assert_eq!(item.kind, Kind::Section);
        assert_eq!(item.key.as_deref(), Some("elettricita"));
    }

    #[test]
    fn test_result_item_issue() {
        let item = ResultItem::issue(
            Severity::Warning,
            ItemError::new("EMPTY_CATEGORY", "Category 'Varie' has no articles"),
            "catalog/Varie",
        );
        assert_eq!(item.kind, Kind::Issue);
        assert_eq!(item.severity, Some(Severity::Warning));
        assert_eq!(item.errors[0].code, "EMPTY_CATEGORY");
        assert_eq!(item.excerpt.as_deref(), Some("Category 'Varie' has no articles"));
    }

    #[test]
    fn test_result_item_error() {
        let item = ResultItem::error(ItemError::new("DATA_UNAVAILABLE", "missing"));
        assert_eq!(item.kind, Kind::Error);
        assert_eq!(item.errors.len(), 1);
        assert_eq!(item.errors[0].message, "missing");
    }

    #[test]
    fn test_result_item_with_meta_and_data() {
        let meta = Meta {
            size: Some(1024),
            hash: Some("abc123".to_string()),
            ..Meta::default()
        };
        let item = ResultItem::status("catalog", "ok")
            .with_meta(meta)
            .with_data(serde_json::json!({"categories": 3}))
            .with_source("data/aduana_cuba_db.json");
        assert_eq!(item.meta.size, Some(1024));
        assert_eq!(item.data.unwrap()["categories"], 3);
        assert_eq!(item.source.as_deref(), Some("data/aduana_cuba_db.json"));
    }

    #[test]
    fn test_result_set_limit_flags_truncation() {
        let mut set: ResultSet = (0..5)
            .map(|i| ResultItem::status(i.to_string(), "x"))
            .collect();
        set.limit(NonZeroUsize::new(2).unwrap());
        assert_eq!(set.len(), 2);
        assert!(set.items[1].meta.truncated);
        assert!(!set.items[0].meta.truncated);
    }

    #[test]
    fn test_result_set_limit_noop_when_short() {
        let mut set = ResultSet::new();
        set.push(ResultItem::status("a", "x"));
        set.limit(NonZeroUsize::new(10).unwrap());
        assert_eq!(set.len(), 1);
        assert!(!set.items[0].meta.truncated);
    }

    #[test]
    fn test_result_set_extend_and_iter() {
        let mut set = ResultSet::new();
        set.extend(vec![ResultItem::status("a", "x"), ResultItem::status("b", "y")]);
        assert_eq!(set.len(), 2);
        let items: Vec<_> = set.into_iter().collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_kind_serialization() {
        let item = ResultItem::article(card("Laptop"), "Elettronica", 8);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"article\""));
        assert!(json.contains("\"score\":8"));
        assert!(!json.contains("\"errors\""));
    }

    #[test]
    fn test_result_item_deserialization() {
        let json = r#"{"kind":"status","key":"guide","excerpt":"ok","meta":{"truncated":false}}"#;
        let item: ResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, Kind::Status);
        assert_eq!(item.key.as_deref(), Some("guide"));
    }
}
