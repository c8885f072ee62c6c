//! Catalog data model
//!
//! The catalog owns its categories and each category owns its articles.
//! Field names on the wire are the dataset's Italian keys.

use serde::{Deserialize, Serialize};

use crate::core::loader::{list_skip_nulls, null_as_default};

/// The customs article catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "categorie", default, deserialize_with = "list_skip_nulls")]
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Total number of articles across all categories
    pub fn article_count(&self) -> usize {
        self.categories.iter().map(|c| c.articles.len()).sum()
    }

    /// Every article with its owning category, in declaration order
    pub fn articles(&self) -> impl Iterator<Item = (&Category, &Article)> {
        self.categories
            .iter()
            .flat_map(|category| category.articles.iter().map(move |article| (category, article)))
    }
}

/// A group of articles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "nome_it")]
    pub name: String,

    #[serde(rename = "icona", default, deserialize_with = "null_as_default")]
    pub icon: String,

    #[serde(rename = "articoli", default, deserialize_with = "list_skip_nulls")]
    pub articles: Vec<Article>,
}

/// A single customs-regulated item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Name in the primary language
    #[serde(rename = "nome_it")]
    pub name: String,

    /// Name in the secondary language
    #[serde(rename = "nome_es", default, skip_serializing_if = "Option::is_none")]
    pub secondary_name: Option<String>,

    #[serde(
        rename = "sinonimi",
        default,
        deserialize_with = "list_skip_nulls",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub synonyms: Vec<String>,

    #[serde(rename = "quantita_max", default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<MaxQuantity>,

    #[serde(rename = "unita", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Maximum value per item, in USD
    #[serde(
        rename = "valore_max_per_articolo_usd",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_value_usd: Option<f64>,

    #[serde(
        rename = "autorizzazione_richiesta",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requires_authorization: Option<bool>,

    #[serde(rename = "importante", default, skip_serializing_if = "Option::is_none")]
    pub important: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(rename = "condizioni", default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    #[serde(
        rename = "metodo_valorazione",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub valuation_method: Option<String>,

    #[serde(rename = "equivalenza", default, skip_serializing_if = "Option::is_none")]
    pub equivalence: Option<String>,
}

/// Sentinel text for a temporarily unlimited allowance
pub const UNLIMITED_TEMPORARY: &str = "illimitata (temporaneamente)";

/// Sentinel text for an allowance that varies case by case
pub const VARIABLE: &str = "variabile";

/// Maximum permitted quantity of an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuantityRepr", into = "QuantityRepr")]
pub enum MaxQuantity {
    Count(serde_json::Number),
    UnlimitedTemporary,
    Variable,
    /// Any other text, shown verbatim
    Other(String),
}

impl MaxQuantity {
    /// A numeric zero carries no allowance to show
    pub fn is_zero(&self) -> bool {
        matches!(self, MaxQuantity::Count(n) if n.as_f64() == Some(0.0))
    }
}

impl std::fmt::Display for MaxQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaxQuantity::Count(n) => write!(f, "{}", n),
            MaxQuantity::UnlimitedTemporary => f.write_str(UNLIMITED_TEMPORARY),
            MaxQuantity::Variable => f.write_str(VARIABLE),
            MaxQuantity::Other(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Number(serde_json::Number),
    Text(String),
}

impl From<QuantityRepr> for MaxQuantity {
    fn from(repr: QuantityRepr) -> Self {
        match repr {
            QuantityRepr::Number(n) => MaxQuantity::Count(n),
            QuantityRepr::Text(text) => match text.trim() {
                UNLIMITED_TEMPORARY => MaxQuantity::UnlimitedTemporary,
                VARIABLE => MaxQuantity::Variable,
                _ => MaxQuantity::Other(text),
            },
        }
    }
}

impl From<MaxQuantity> for QuantityRepr {
    fn from(quantity: MaxQuantity) -> Self {
        match quantity {
            MaxQuantity::Count(n) => QuantityRepr::Number(n),
            other => QuantityRepr::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_minimal() {
        let article: Article = serde_json::from_value(json!({"nome_it": "Televisore"})).unwrap();
        assert_eq!(article.name, "Televisore");
        assert!(article.secondary_name.is_none());
        assert!(article.synonyms.is_empty());
        assert!(article.max_quantity.is_none());
    }

    #[test]
    fn test_article_full() {
        let article: Article = serde_json::from_value(json!({
            "nome_it": "Computer portatile",
            "nome_es": "Computadora portátil",
            "sinonimi": ["laptop", "notebook"],
            "quantita_max": 2,
            "unita": "pezzi",
            "valore_max_per_articolo_usd": 1000,
            "autorizzazione_richiesta": false,
            "importante": "Dichiarare in dogana",
            "note": "Uso personale",
            "condizioni": "Nuovo o usato",
            "metodo_valorazione": "Per unità",
            "equivalenza": "1 pezzo = 1 unità"
        }))
        .unwrap();
        assert_eq!(article.secondary_name.as_deref(), Some("Computadora portátil"));
        assert_eq!(article.synonyms.len(), 2);
        assert_eq!(article.max_quantity, Some(MaxQuantity::Count(2.into())));
        assert_eq!(article.max_value_usd, Some(1000.0));
        assert_eq!(article.requires_authorization, Some(false));
        assert_eq!(article.equivalence.as_deref(), Some("1 pezzo = 1 unità"));
    }

    #[test]
    fn test_max_quantity_sentinels() {
        let unlimited: MaxQuantity = serde_json::from_value(json!(UNLIMITED_TEMPORARY)).unwrap();
        assert_eq!(unlimited, MaxQuantity::UnlimitedTemporary);

        let variable: MaxQuantity = serde_json::from_value(json!("variabile")).unwrap();
        assert_eq!(variable, MaxQuantity::Variable);

        let other: MaxQuantity = serde_json::from_value(json!("10 kg")).unwrap();
        assert_eq!(other, MaxQuantity::Other("10 kg".to_string()));
    }

    #[test]
    fn test_max_quantity_round_trips_through_wire_form() {
        let json = serde_json::to_value(MaxQuantity::Variable).unwrap();
        assert_eq!(json, json!("variabile"));
        let json = serde_json::to_value(MaxQuantity::Count(3.into())).unwrap();
        assert_eq!(json, json!(3));
    }

    #[test]
    fn test_max_quantity_is_zero() {
        assert!(MaxQuantity::Count(0.into()).is_zero());
        assert!(!MaxQuantity::Count(1.into()).is_zero());
        assert!(!MaxQuantity::Variable.is_zero());
    }

    #[test]
    fn test_catalog_articles_in_declaration_order() {
        let catalog: Catalog = serde_json::from_value(json!({
            "categorie": [
                {"nome_it": "A", "icona": "a", "articoli": [{"nome_it": "a1"}, {"nome_it": "a2"}]},
                {"nome_it": "B", "icona": "b", "articoli": [{"nome_it": "b1"}]}
            ]
        }))
        .unwrap();
        let names: Vec<_> = catalog.articles().map(|(c, a)| (c.name.as_str(), a.name.as_str())).collect();
        assert_eq!(names, vec![("A", "a1"), ("A", "a2"), ("B", "b1")]);
        assert_eq!(catalog.article_count(), 3);
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let catalog: Catalog = serde_json::from_value(json!({
            "categorie": [
                {
                    "nome_it": "Elettronica",
                    "icona": null,
                    "articoli": [
                        {"nome_it": "Computer portatile", "sinonimi": null},
                        {"nome_it": "Tablet", "sinonimi": ["ipad", null]}
                    ]
                },
                {"nome_it": "Varie", "articoli": null},
                null
            ]
        }))
        .unwrap();
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.categories[0].icon, "");
        assert!(catalog.categories[0].articles[0].synonyms.is_empty());
        assert_eq!(catalog.categories[0].articles[1].synonyms, vec!["ipad"]);
        assert!(catalog.categories[1].articles.is_empty());
    }

    #[test]
    fn test_article_missing_name_is_malformed() {
        let result: Result<Article, _> = serde_json::from_value(json!({"nome_es": "Televisor"}));
        assert!(result.is_err());
    }
}
