//! Request/response DTOs and view mapping.

use serde::{Deserialize, Serialize};

use camocpq_catalog::{Addon, Product};
use camocpq_quotes::Quote;
use camocpq_selection::SelectionEngine;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SkuRequest {
    pub sku: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveQuoteRequest {
    pub quantity: u32,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit_price_cents: u64,
    pub unit_price: String,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        Self {
            sku: p.sku.to_string(),
            name: p.name.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            unit_price_cents: p.unit_price.as_u64(),
            unit_price: p.unit_price.to_string(),
        }
    }
}

/// A product-scoped add-on as the picker renders it: checked state plus the
/// disabled-for-new-selection flag.
#[derive(Debug, Serialize)]
pub struct AddonView {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit_price_cents: u64,
    pub unit_price: String,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub product: Option<ProductView>,
    /// Add-ons scoped to the selected product, in catalog order.
    pub addons: Vec<AddonView>,
    pub total_cents: u64,
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_error: Option<String>,
}

impl SessionView {
    pub fn from_engine(engine: &SelectionEngine, catalog_error: Option<&str>) -> Self {
        let selected = engine.selected_addon_skus();
        let disabled = engine.disabled_skus();

        let addons = engine
            .product_scoped_addons()
            .into_iter()
            .map(|a: &Addon| {
                let is_selected = selected.contains(&a.sku);
                AddonView {
                    sku: a.sku.to_string(),
                    name: a.name.clone(),
                    description: a.description.clone(),
                    category: a.category.clone(),
                    unit_price_cents: a.unit_price.as_u64(),
                    unit_price: a.unit_price.to_string(),
                    selected: is_selected,
                    // A checked add-on is never rendered disabled; the flag
                    // only blocks fresh selection.
                    disabled: !is_selected && disabled.contains(&a.sku),
                }
            })
            .collect();

        let total = engine.total();
        Self {
            product: engine.selected_product().map(ProductView::from),
            addons,
            total_cents: total.as_u64(),
            total: total.to_string(),
            catalog_error: catalog_error.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteView {
    pub id: i64,
    pub product: String,
    pub quantity: u32,
    pub total_cents: u64,
    pub total: String,
    pub created_at: String,
}

impl From<Quote> for QuoteView {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            product: q.product,
            quantity: q.quantity,
            total_cents: q.total.as_u64(),
            total: q.total.to_string(),
            created_at: q.created_at.to_rfc3339(),
        }
    }
}
