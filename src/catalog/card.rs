//! Article cards
//!
//! Turns one article and its category into a display fragment: a quantity
//! badge followed by value, authorization and free-text notes.

use crate::catalog::model::{Article, Category, MaxQuantity};
use crate::core::fragment::{present, Blocks, Fragment, Tone};
use crate::core::util::format_number;

/// Unit shown when an article has a numeric limit but no unit
pub const DEFAULT_UNIT: &str = "pezzi";

/// Build the quantity badge, if the article has a limit worth showing
pub fn quantity_badge(article: &Article) -> Option<(Tone, String)> {
    let quantity = article.max_quantity.as_ref()?;
    match quantity {
        MaxQuantity::UnlimitedTemporary => {
            Some((Tone::Success, "✓ ILLIMITATO (temporaneo)".to_string()))
        }
        MaxQuantity::Variable => Some((Tone::Warning, "⚠️ Quantità variabile".to_string())),
        MaxQuantity::Other(text) if text.trim().is_empty() => None,
        q if q.is_zero() => None,
        q => {
            let unit = present(article.unit.as_deref()).unwrap_or(DEFAULT_UNIT);
            Some((Tone::Neutral, format!("✓ Massimo: {} {}", q, unit)))
        }
    }
}

/// Valuation text with the optional equivalence in parentheses
fn valuation(article: &Article) -> Option<String> {
    let method = present(article.valuation_method.as_deref())?;
    Some(match present(article.equivalence.as_deref()) {
        Some(equivalence) => format!("⚖️ Valorazione: {} ({})", method, equivalence),
        None => format!("⚖️ Valorazione: {}", method),
    })
}

/// Render an article card
pub fn article_card(article: &Article, category: &Category) -> Fragment {
    let mut blocks = Blocks::new();

    if let Some((tone, text)) = quantity_badge(article) {
        blocks.badge(tone, text);
    }

    blocks.note(
        Tone::Info,
        article
            .max_value_usd
            .filter(|v| *v != 0.0)
            .map(|v| format!("💵 Valore massimo per articolo: {} USD", format_number(v))),
    );

    if article.requires_authorization == Some(true) {
        blocks.banner(Tone::Danger, Some("⚠️ RICHIEDE AUTORIZZAZIONE PREVENTIVA"));
    }

    blocks
        .banner(
            Tone::Danger,
            present(article.important.as_deref()).map(|text| format!("⚠️ {}", text)),
        )
        .note(
            Tone::Info,
            present(article.note.as_deref()).map(|text| format!("ℹ️ {}", text)),
        )
        .note(
            Tone::Info,
            present(article.conditions.as_deref()).map(|text| format!("📋 Condizioni: {}", text)),
        )
        .note(Tone::Info, valuation(article));

    Fragment::new(article.name.as_str(), Some(category.icon.as_str()), blocks)
        .with_subtitle(category.name.as_str())
}
