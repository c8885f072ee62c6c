//! Data linting
//!
//! Catalog checks:
//! - empty and duplicate categories
//! - duplicate articles inside a category
//! - missing or unrecognized quantity limits
//! - blank synonyms
//!
//! Guide checks:
//! - unknown and duplicate section keys
//! - malformed embassy email and website

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::catalog::model::{Catalog, MaxQuantity};
use crate::core::loader::{load_catalog, load_guide};
use crate::core::model::{ItemError, ResultItem, ResultSet, Severity};
use crate::core::paths::DataPaths;
use crate::core::render::{RenderConfig, Renderer};
use crate::guide::model::{Guide, SectionContent};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("Invalid EMAIL_RE regex"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/]+\.[^\s]+$").expect("Invalid URL_RE regex"));

/// A lint issue
#[derive(Debug, Clone, PartialEq)]
pub struct LintIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    /// Location inside the document, e.g. `categorie[2].articoli[0]`
    pub location: String,
}

impl LintIssue {
    pub fn error(code: &str, message: String, location: String) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message,
            location,
        }
    }

    pub fn warning(code: &str, message: String, location: String) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message,
            location,
        }
    }

    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::issue(
            self.severity,
            ItemError::new(&self.code, &self.message),
            &self.location,
        )
    }
}

/// Lint the customs catalog
pub fn lint_catalog(catalog: &Catalog) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut category_names: HashMap<String, Vec<usize>> = HashMap::new();

    for (ci, category) in catalog.categories.iter().enumerate() {
        let location = format!("categorie[{}]", ci);
        category_names
            .entry(category.name.trim().to_lowercase())
            .or_default()
            .push(ci);

        if category.articles.is_empty() {
            issues.push(LintIssue::warning(
                "EMPTY_CATEGORY",
                format!("Category '{}' has no articles", category.name),
                location.clone(),
            ));
        }

        let mut article_names: HashMap<String, usize> = HashMap::new();
        for (ai, article) in category.articles.iter().enumerate() {
            let location = format!("{}.articoli[{}]", location, ai);

            let key = article.name.trim().to_lowercase();
            if let Some(first) = article_names.get(&key) {
                issues.push(LintIssue::warning(
                    "DUPLICATE_ARTICLE",
                    format!(
                        "Article '{}' already listed at position {} of '{}'",
                        article.name,
                        first + 1,
                        category.name
                    ),
                    location.clone(),
                ));
            } else {
                article_names.insert(key, ai);
            }

            match &article.max_quantity {
                None => issues.push(LintIssue::warning(
                    "MISSING_QUANTITY",
                    format!("Article '{}' has no quantity limit", article.name),
                    location.clone(),
                )),
                Some(MaxQuantity::Other(text)) => issues.push(LintIssue::warning(
                    "UNKNOWN_QUANTITY",
                    format!(
                        "Article '{}' has unrecognized quantity text '{}'",
                        article.name, text
                    ),
                    location.clone(),
                )),
                Some(_) => {}
            }

            if article.synonyms.iter().any(|s| s.trim().is_empty()) {
                issues.push(LintIssue::warning(
                    "BLANK_SYNONYM",
                    format!("Article '{}' has a blank synonym", article.name),
                    location,
                ));
            }
        }
    }

    let mut duplicates: Vec<_> = category_names
        .into_iter()
        .filter(|(_, positions)| positions.len() > 1)
        .collect();
    duplicates.sort_by_key(|(_, positions)| positions[0]);

    for (_, positions) in duplicates {
        for &ci in &positions {
            issues.push(LintIssue::error(
                "DUPLICATE_CATEGORY",
                format!(
                    "Category '{}' is declared {} times",
                    catalog.categories[ci].name,
                    positions.len()
                ),
                format!("categorie[{}]", ci),
            ));
        }
    }

    issues
}

/// Lint the travel guide
pub fn lint_guide(guide: &Guide) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (si, section) in guide.sections.iter().enumerate() {
        let location = format!("sezioni[{}]", si);

        if let Some(first) = seen.get(section.key()) {
            issues.push(LintIssue::error(
                "DUPLICATE_SECTION",
                format!(
                    "Section '{}' already defined at sezioni[{}]",
                    section.key(),
                    first
                ),
                location.clone(),
            ));
        } else {
            seen.insert(section.key(), si);
        }

        match &section.content {
            SectionContent::Unrecognized { key } => issues.push(LintIssue::warning(
                "UNKNOWN_SECTION",
                format!("Section '{}' has no formatter and renders as a placeholder", key),
                location,
            )),
            SectionContent::Embassy(embassy) => {
                if let Some(email) = embassy.consular_email.as_deref() {
                    if !EMAIL_RE.is_match(email.trim()) {
                        issues.push(LintIssue::warning(
                            "INVALID_EMAIL",
                            format!("Consular email '{}' is not a valid address", email),
                            format!("{}.contenuto.email_consolare", location),
                        ));
                    }
                }
                if let Some(url) = embassy.website.as_deref() {
                    if !URL_RE.is_match(url.trim()) {
                        issues.push(LintIssue::warning(
                            "INVALID_URL",
                            format!("Website '{}' is not an http(s) URL", url),
                            format!("{}.contenuto.sito_web", location),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    issues
}

/// Run the lint command
pub fn run_lint(paths: &DataPaths, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();

    match load_catalog(&paths.catalog) {
        Ok(catalog) => {
            let source = paths.display(&paths.catalog);
            result_set.extend(lint_catalog(&catalog).iter().map(|issue| {
                let mut item = issue.to_result_item();
                item.source = Some(format!("{}#{}", source, issue.location));
                item
            }));
        }
        Err(err) => result_set.push(err.to_result_item()),
    }

    match load_guide(&paths.guide) {
        Ok(guide) => {
            let source = paths.display(&paths.guide);
            result_set.extend(lint_guide(&guide).iter().map(|issue| {
                let mut item = issue.to_result_item();
                item.source = Some(format!("{}#{}", source, issue.location));
                item
            }));
        }
        Err(err) => result_set.push(err.to_result_item()),
    }

    tracing::debug!(issues = result_set.len(), "lint finished");

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codes(issues: &[LintIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.code.as_str()).collect()
    }

    #[test]
    fn test_clean_catalog() {
        let catalog: Catalog = serde_json::from_value(json!({
            "categorie": [{"nome_it": "Elettronica", "articoli": [
                {"nome_it": "Computer portatile", "sinonimi": ["laptop"], "quantita_max": 2},
                {"nome_it": "Medicinali", "quantita_max": "illimitata (temporaneamente)"},
                {"nome_it": "Alimenti", "quantita_max": "variabile"}
            ]}]
        }))
        .unwrap();
        assert!(lint_catalog(&catalog).is_empty());
    }

    #[test]
    fn test_catalog_issues() {
        let catalog: Catalog = serde_json::from_value(json!({
            "categorie": [
                {"nome_it": "Elettronica", "articoli": [
                    {"nome_it": "Tablet", "quantita_max": 1},
                    {"nome_it": "tablet ", "quantita_max": 1, "sinonimi": ["", "ipad"]},
                    {"nome_it": "Radio"},
                    {"nome_it": "Sigari", "quantita_max": "50 unità"}
                ]},
                {"nome_it": "Varie"},
                {"nome_it": "ELETTRONICA", "articoli": [{"nome_it": "Mouse", "quantita_max": 3}]}
            ]
        }))
        .unwrap();
        let issues = lint_catalog(&catalog);
        assert_eq!(
            codes(&issues),
            vec![
                "DUPLICATE_ARTICLE",
                "BLANK_SYNONYM",
                "MISSING_QUANTITY",
                "UNKNOWN_QUANTITY",
                "EMPTY_CATEGORY",
                "DUPLICATE_CATEGORY",
                "DUPLICATE_CATEGORY",
            ]
        );
        assert_eq!(issues[0].location, "categorie[0].articoli[1]");
        assert_eq!(issues[4].location, "categorie[1]");
        assert_eq!(issues[6].location, "categorie[2]");
        assert_eq!(issues[5].severity, Severity::Error);
    }

    #[test]
    fn test_guide_issues() {
        let guide: Guide = serde_json::from_value(json!({
            "sezioni": [
                {"id": "ambasciata", "titolo": "Ambasciata", "contenuto": {
                    "email_consolare": "consolare.avana(at)esteri.it",
                    "sito_web": "ambavana.esteri.it"
                }},
                {"id": "spiagge", "titolo": "Spiagge"},
                {"id": "ambasciata", "titolo": "Ambasciata bis", "contenuto": {
                    "email_consolare": "consolare.avana@esteri.it",
                    "sito_web": "https://ambavana.esteri.it"
                }}
            ]
        }))
        .unwrap();
        let issues = lint_guide(&guide);
        assert_eq!(
            codes(&issues),
            vec!["INVALID_EMAIL", "INVALID_URL", "UNKNOWN_SECTION", "DUPLICATE_SECTION"]
        );
        assert_eq!(issues[0].location, "sezioni[0].contenuto.email_consolare");
        assert_eq!(issues[3].location, "sezioni[2]");
    }

    #[test]
    fn test_issue_to_result_item() {
        let issue = LintIssue::warning(
            "EMPTY_CATEGORY",
            "Category 'Varie' has no articles".to_string(),
            "categorie[1]".to_string(),
        );
        let item = issue.to_result_item();
        assert_eq!(item.severity, Some(Severity::Warning));
        assert_eq!(item.errors[0].code, "EMPTY_CATEGORY");
        assert_eq!(item.source.as_deref(), Some("categorie[1]"));
    }
}
