//! Catalog document parsing.
//!
//! The document is the original picker's `products.json` shape: a top-level
//! object with `products` and `addons` keyed by SKU, plus optional
//! `product-categories` / `addon-categories` arrays. Keyed entries are read
//! in document order (serde_json `preserve_order`), which defines catalog
//! order everywhere downstream.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use camocpq_core::{Cents, DomainError, Sku};

use crate::model::{Addon, Catalog, Product};

/// Catalog parse/validation failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry key {key:?} does not match record sku {sku}")]
    KeyMismatch { key: String, sku: Sku },

    #[error("duplicate SKU in catalog: {0}")]
    DuplicateSku(Sku),

    #[error("add-on {addon} references unknown parent product {parent}")]
    UnknownParentSku { addon: Sku, parent: Sku },

    #[error("invalid record {sku}: {source}")]
    InvalidRecord {
        sku: Sku,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Map<String, Value>,
    #[serde(default)]
    addons: Map<String, Value>,
    #[serde(default, rename = "product-categories")]
    product_categories: Vec<String>,
    #[serde(default, rename = "addon-categories")]
    addon_categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    sku: Sku,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: String,
    total_cost: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct AddonRecord {
    sku: Sku,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: String,
    total_cost: serde_json::Number,
    #[serde(default)]
    parent_skus: Vec<Sku>,
    #[serde(default)]
    incompatible_skus: Vec<Sku>,
}

/// Parse and validate a raw catalog document into an immutable [`Catalog`].
pub fn parse_catalog(document: &str) -> Result<Catalog, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(document)?;

    let mut products = Vec::with_capacity(doc.products.len());
    for (key, value) in doc.products {
        let record: ProductRecord = serde_json::from_value(value)?;
        ensure_key_matches(&key, &record.sku)?;
        products.push(Product {
            unit_price: price(&record.sku, &record.total_cost)?,
            sku: record.sku,
            name: record.name,
            description: record.description,
            category: record.category,
        });
    }

    let mut addons = Vec::with_capacity(doc.addons.len());
    for (key, value) in doc.addons {
        let record: AddonRecord = serde_json::from_value(value)?;
        ensure_key_matches(&key, &record.sku)?;
        addons.push(Addon {
            unit_price: price(&record.sku, &record.total_cost)?,
            sku: record.sku,
            name: record.name,
            description: record.description,
            category: record.category,
            parent_skus: record.parent_skus.into_iter().collect::<BTreeSet<_>>(),
            incompatible_skus: record.incompatible_skus.into_iter().collect::<BTreeSet<_>>(),
        });
    }

    Catalog::build(products, addons, doc.product_categories, doc.addon_categories)
}

fn ensure_key_matches(key: &str, sku: &Sku) -> Result<(), CatalogError> {
    if key != sku.as_str() {
        return Err(CatalogError::KeyMismatch {
            key: key.to_string(),
            sku: sku.clone(),
        });
    }
    Ok(())
}

fn price(sku: &Sku, raw: &serde_json::Number) -> Result<Cents, CatalogError> {
    Cents::from_decimal_str(&raw.to_string()).map_err(|source| CatalogError::InvalidRecord {
        sku: sku.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
    {
      "products": {
        "P1": { "sku": "P1", "name": "Base Tent", "description": "4-person tent", "category": "tents", "total_cost": 100 },
        "P2": { "sku": "P2", "name": "Netting Kit", "category": "nets", "total_cost": 59.5 }
      },
      "addons": {
        "A1": { "sku": "A1", "name": "Stake Set", "category": "hardware", "total_cost": 10, "parent_skus": ["P1"], "incompatible_skus": ["A2"] },
        "A2": { "sku": "A2", "name": "Sand Anchors", "category": "hardware", "total_cost": 20, "parent_skus": ["P1"] }
      },
      "product-categories": ["tents", "nets"]
    }
    "#;

    #[test]
    fn parses_the_original_document_shape() {
        let catalog = parse_catalog(DOC).unwrap();

        let skus: Vec<&str> = catalog.products().iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, ["P1", "P2"]);
        assert_eq!(catalog.products()[0].unit_price, Cents::new(10_000));
        assert_eq!(catalog.products()[1].unit_price, Cents::new(5_950));
        assert_eq!(catalog.product_categories(), ["tents", "nets"]);
        // No explicit addon categories: derived first-seen.
        assert_eq!(catalog.addon_categories(), ["hardware"]);

        let a1 = catalog.addon(&Sku::new("A1").unwrap()).unwrap();
        assert!(a1.attaches_to(&Sku::new("P1").unwrap()));
        assert!(a1.incompatible_skus.contains(&Sku::new("A2").unwrap()));
    }

    #[test]
    fn missing_sections_yield_an_empty_catalog() {
        let catalog = parse_catalog("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn rejects_key_sku_mismatch() {
        let doc = r#"{ "products": { "WRONG": { "sku": "P1", "name": "x", "category": "c", "total_cost": 1 } } }"#;
        assert!(matches!(
            parse_catalog(doc).unwrap_err(),
            CatalogError::KeyMismatch { .. }
        ));
    }

    #[test]
    fn rejects_sub_cent_prices() {
        let doc = r#"{ "products": { "P1": { "sku": "P1", "name": "x", "category": "c", "total_cost": 1.005 } } }"#;
        assert!(matches!(
            parse_catalog(doc).unwrap_err(),
            CatalogError::InvalidRecord { .. }
        ));
    }

    #[test]
    fn rejects_negative_prices() {
        let doc = r#"{ "products": { "P1": { "sku": "P1", "name": "x", "category": "c", "total_cost": -5 } } }"#;
        assert!(matches!(
            parse_catalog(doc).unwrap_err(),
            CatalogError::InvalidRecord { .. }
        ));
    }

    #[test]
    fn rejects_empty_skus() {
        let doc = r#"{ "products": { "": { "sku": "", "name": "x", "category": "c", "total_cost": 1 } } }"#;
        assert!(matches!(
            parse_catalog(doc).unwrap_err(),
            CatalogError::Json(_)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_catalog("not json").unwrap_err(),
            CatalogError::Json(_)
        ));
    }
}
