//! Doctor - data document checks
//!
//! Reports, for each document, whether it can be read and parsed, together
//! with its size, modification time, content hash and entry counts.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

use crate::catalog::model::Catalog;
use crate::core::error::DataError;
use crate::core::loader::{parse_document, read_bytes};
use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::paths::DataPaths;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{hash_bytes, modified_rfc3339, HashAlgorithm};
use crate::guide::model::Guide;

/// Which document a status refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Catalog,
    Guide,
}

impl Document {
    pub fn name(&self) -> &'static str {
        match self {
            Document::Catalog => "catalog",
            Document::Guide => "guide",
        }
    }
}

/// Health of one data document
#[derive(Debug)]
pub struct DocumentStatus {
    pub document: Document,
    pub path: String,
    pub meta: Meta,
    pub counts: Option<serde_json::Value>,
    pub error: Option<DataError>,
}

impl DocumentStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn to_result_item(&self) -> ResultItem {
        let item = match &self.error {
            None => ResultItem::status(self.document.name(), self.summary()),
            Some(err) => {
                let mut item = ResultItem::error(err.to_item_error());
                item.key = Some(self.document.name().to_string());
                item
            }
        };

        let item = item
            .with_source(self.path.clone())
            .with_meta(self.meta.clone());
        match &self.counts {
            Some(counts) => item.with_data(counts.clone()),
            None => item,
        }
    }

    fn summary(&self) -> String {
        let counts = self.counts.as_ref();
        let count = |field: &str| {
            counts
                .and_then(|c| c[field].as_u64())
                .unwrap_or_default()
        };
        match self.document {
            Document::Catalog => format!(
                "✓ {} categories, {} articles",
                count("categories"),
                count("articles")
            ),
            Document::Guide => format!(
                "✓ {} sections ({} unrecognized)",
                count("sections"),
                count("unrecognized")
            ),
        }
    }
}

fn inspect(
    document: Document,
    path: &Path,
    paths: &DataPaths,
    algorithm: HashAlgorithm,
) -> DocumentStatus {
    let mut status = DocumentStatus {
        document,
        path: paths.display(path),
        meta: Meta::default(),
        counts: None,
        error: None,
    };

    let bytes = match read_bytes(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(document = document.name(), code = err.code(), "document unavailable");
            status.error = Some(err);
            return status;
        }
    };

    status.meta.size = Some(bytes.len() as u64);
    status.meta.modified = modified_rfc3339(path).ok();
    status.meta.hash = Some(format!("{}:{}", algorithm.name(), hash_bytes(&bytes, algorithm)));

    let counts = match document {
        Document::Catalog => parse_document::<Catalog>(path, &bytes).map(|catalog| {
            json!({
                "categories": catalog.categories.len(),
                "articles": catalog.article_count(),
            })
        }),
        Document::Guide => parse_document::<Guide>(path, &bytes).map(|guide| {
            let unrecognized = guide
                .sections
                .iter()
                .filter(|section| section.known_key().is_none())
                .count();
            json!({
                "sections": guide.sections.len(),
                "unrecognized": unrecognized,
            })
        }),
    };

    match counts {
        Ok(counts) => status.counts = Some(counts),
        Err(err) => {
            tracing::warn!(document = document.name(), code = err.code(), "document malformed");
            status.error = Some(err);
        }
    }

    status
}

/// Check both data documents
pub fn check_documents(paths: &DataPaths, algorithm: HashAlgorithm) -> Vec<DocumentStatus> {
    vec![
        inspect(Document::Catalog, &paths.catalog, paths, algorithm),
        inspect(Document::Guide, &paths.guide, paths, algorithm),
    ]
}

/// Run the doctor command
pub fn run_doctor(
    paths: &DataPaths,
    algorithm: HashAlgorithm,
    quiet: bool,
    config: RenderConfig,
) -> Result<()> {
    let statuses = check_documents(paths, algorithm);

    let result_set: ResultSet = statuses.iter().map(DocumentStatus::to_result_item).collect();

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    if !quiet {
        for status in &statuses {
            let line = match &status.error {
                None => format!("{} {}", "✓".green(), status.document.name()),
                Some(err) => format!("{} {}: {}", "✗".red(), status.document.name(), err.code()),
            };
            eprintln!("{}", line);
        }
        if statuses.iter().any(|s| !s.is_ok()) {
            eprintln!("\n{}", "⚠️  Some data documents cannot be used!".yellow());
        }
    }

    Ok(())
}
