//! Document loading
//!
//! Both documents are read once per command and handed to the core as
//! immutable values. A document either loads completely or not at all.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

use crate::catalog::model::Catalog;
use crate::core::error::DataError;
use crate::guide::model::Guide;

/// Read the raw bytes of a document
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, DataError> {
    fs::read(path).map_err(|source| DataError::Unavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an already-read document
pub fn parse_document<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, DataError> {
    serde_json::from_slice(bytes).map_err(|source| DataError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a JSON document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let bytes = read_bytes(path)?;
    parse_document(path, &bytes)
}

/// Deserialize a field, reading `null` as the type's default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a list, reading `null` as empty and dropping `null` entries
pub fn list_skip_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

/// Load the customs catalog
pub fn load_catalog(path: &Path) -> Result<Catalog, DataError> {
    let catalog: Catalog = read_document(path).inspect_err(|err| {
        tracing::error!(path = %path.display(), code = err.code(), "catalog load failed");
    })?;

    tracing::info!(
        path = %path.display(),
        categories = catalog.categories.len(),
        articles = catalog.article_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load the travel guide
pub fn load_guide(path: &Path) -> Result<Guide, DataError> {
    let guide: Guide = read_document(path).inspect_err(|err| {
        tracing::error!(path = %path.display(), code = err.code(), "guide load failed");
    })?;

    tracing::info!(
        path = %path.display(),
        sections = guide.sections.len(),
        "guide loaded"
    );
    Ok(guide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[test]
    fn test_load_catalog_missing_file() {
        let temp = tempdir().unwrap();
        let err = load_catalog(&temp.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code(), "DATA_UNAVAILABLE");
    }

    #[test]
    fn test_load_catalog_malformed() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("db.json");
        fs::write(&path, "{\"categorie\": [").unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.code(), "DATA_MALFORMED");
    }

    #[test]
    fn test_load_catalog_ok() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("db.json");
        fs::write(
            &path,
            r#"{"categorie":[{"nome_it":"Elettronica","icona":"💻","articoli":[{"nome_it":"Computer portatile"}]}]}"#,
        )
        .unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.article_count(), 1);
    }

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "list_skip_nulls")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
    }

    #[test]
    fn test_list_skip_nulls() {
        let value: Lenient = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(value.items.is_empty());

        let value: Lenient = serde_json::from_str(r#"{"items": ["a", null, "b"]}"#).unwrap();
        assert_eq!(value.items, vec!["a", "b"]);

        let value: Lenient = serde_json::from_str("{}").unwrap();
        assert!(value.items.is_empty());
    }

    #[test]
    fn test_list_skip_nulls_still_rejects_wrong_type() {
        let result: Result<Lenient, _> = serde_json::from_str(r#"{"items": "a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_as_default() {
        let value: Lenient = serde_json::from_str(r#"{"label": null}"#).unwrap();
        assert_eq!(value.label, "");
    }

    #[test]
    fn test_load_catalog_with_null_lists() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("db.json");
        fs::write(
            &path,
            r#"{"categorie":[{"nome_it":"Elettronica","icona":null,"articoli":[{"nome_it":"Computer portatile","sinonimi":null},{"nome_it":"Tablet"}]},{"nome_it":"Varie","articoli":null}]}"#,
        )
        .unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.article_count(), 2);
    }

    #[test]
    fn test_load_guide_ok() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("guide.json");
        fs::write(
            &path,
            r#"{"sezioni":[{"id":"futura","titolo":"Futura","icona":"🆕","contenuto":{}}]}"#,
        )
        .unwrap();
        let guide = load_guide(&path).unwrap();
        assert_eq!(guide.sections.len(), 1);
    }
}
