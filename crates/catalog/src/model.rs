//! Catalog data model.
//!
//! A `Catalog` is created once per session when the provider resolves and is
//! read-only afterwards. All structural validation happens here, at
//! construction time, so the selection engine never has to re-check records.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use camocpq_core::{Cents, Sku};

use crate::document::CatalogError;

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit_price: Cents,
}

/// An add-on that attaches to one or more products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Addon {
    pub sku: Sku,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit_price: Cents,
    /// Products this add-on may attach to.
    pub parent_skus: BTreeSet<Sku>,
    /// Other add-ons this one cannot coexist with.
    pub incompatible_skus: BTreeSet<Sku>,
}

impl Addon {
    /// Whether this add-on is offered for the given product.
    pub fn attaches_to(&self, product: &Sku) -> bool {
        self.parent_skus.contains(product)
    }
}

/// Immutable catalog snapshot for one session.
///
/// Products and add-ons keep document (first-seen) order; lookups go through
/// SKU indexes built once at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    addons: Vec<Addon>,
    product_index: HashMap<Sku, usize>,
    addon_index: HashMap<Sku, usize>,
    product_categories: Vec<String>,
    addon_categories: Vec<String>,
}

impl Catalog {
    /// An empty catalog: the inert view the engine exposes before (or
    /// without) a successful load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate a catalog from already-parsed records.
    ///
    /// Explicit category lists win when non-empty; otherwise categories are
    /// derived by collecting distinct `category` values in first-seen order.
    pub fn build(
        products: Vec<Product>,
        addons: Vec<Addon>,
        product_categories: Vec<String>,
        addon_categories: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let mut product_index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if product_index.insert(product.sku.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSku(product.sku.clone()));
            }
        }

        let mut addon_index = HashMap::with_capacity(addons.len());
        for (i, addon) in addons.iter().enumerate() {
            if product_index.contains_key(&addon.sku) {
                return Err(CatalogError::DuplicateSku(addon.sku.clone()));
            }
            if addon_index.insert(addon.sku.clone(), i).is_some() {
                return Err(CatalogError::DuplicateSku(addon.sku.clone()));
            }
        }

        for addon in &addons {
            for parent in &addon.parent_skus {
                if !product_index.contains_key(parent) {
                    return Err(CatalogError::UnknownParentSku {
                        addon: addon.sku.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            for inc in &addon.incompatible_skus {
                // Can never match a selection, so it is harmless; keep it.
                if !addon_index.contains_key(inc) {
                    tracing::warn!(
                        addon = %addon.sku,
                        incompatible = %inc,
                        "incompatible_skus entry does not name a known add-on"
                    );
                }
            }
        }

        let product_categories = if product_categories.is_empty() {
            derive_categories(products.iter().map(|p| p.category.as_str()))
        } else {
            product_categories
        };
        let addon_categories = if addon_categories.is_empty() {
            derive_categories(addons.iter().map(|a| a.category.as_str()))
        } else {
            addon_categories
        };

        Ok(Self {
            products,
            addons,
            product_index,
            addon_index,
            product_categories,
            addon_categories,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.addons.is_empty()
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Add-ons in catalog order.
    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    pub fn product(&self, sku: &Sku) -> Option<&Product> {
        self.product_index.get(sku).map(|&i| &self.products[i])
    }

    pub fn addon(&self, sku: &Sku) -> Option<&Addon> {
        self.addon_index.get(sku).map(|&i| &self.addons[i])
    }

    /// Add-ons offered for the given product, in catalog order.
    pub fn addons_for<'a>(&'a self, product: &'a Sku) -> impl Iterator<Item = &'a Addon> {
        self.addons.iter().filter(move |a| a.attaches_to(product))
    }

    pub fn product_categories(&self) -> &[String] {
        &self.product_categories
    }

    pub fn addon_categories(&self) -> &[String] {
        &self.addon_categories
    }
}

/// Distinct non-empty category labels in first-seen order.
fn derive_categories<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for label in labels {
        if !label.is_empty() && seen.insert(label) {
            out.push(label.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    fn product(s: &str, category: &str, cents: u64) -> Product {
        Product {
            sku: sku(s),
            name: format!("Product {s}"),
            description: None,
            category: category.to_string(),
            unit_price: Cents::new(cents),
        }
    }

    fn addon(s: &str, parents: &[&str], incompatible: &[&str]) -> Addon {
        Addon {
            sku: sku(s),
            name: format!("Addon {s}"),
            description: None,
            category: "extras".to_string(),
            unit_price: Cents::new(1_000),
            parent_skus: parents.iter().map(|p| sku(p)).collect(),
            incompatible_skus: incompatible.iter().map(|p| sku(p)).collect(),
        }
    }

    #[test]
    fn derives_categories_in_first_seen_order() {
        let catalog = Catalog::build(
            vec![
                product("P1", "tents", 100),
                product("P2", "nets", 100),
                product("P3", "tents", 100),
            ],
            vec![],
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(catalog.product_categories(), ["tents", "nets"]);
    }

    #[test]
    fn explicit_categories_win_when_non_empty() {
        let catalog = Catalog::build(
            vec![product("P1", "tents", 100)],
            vec![],
            vec!["nets".to_string(), "tents".to_string()],
            vec![],
        )
        .unwrap();
        assert_eq!(catalog.product_categories(), ["nets", "tents"]);
    }

    #[test]
    fn rejects_duplicate_skus_across_products_and_addons() {
        let err = Catalog::build(
            vec![product("P1", "tents", 100), product("P1", "tents", 200)],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSku(s) if s.as_str() == "P1"));

        let err = Catalog::build(
            vec![product("P1", "tents", 100)],
            vec![addon("P1", &[], &[])],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSku(s) if s.as_str() == "P1"));
    }

    #[test]
    fn rejects_unknown_parent_sku() {
        let err = Catalog::build(
            vec![product("P1", "tents", 100)],
            vec![addon("A1", &["P9"], &[])],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownParentSku { .. }));
    }

    #[test]
    fn keeps_unknown_incompatible_references() {
        let catalog = Catalog::build(
            vec![product("P1", "tents", 100)],
            vec![addon("A1", &["P1"], &["GHOST"])],
            vec![],
            vec![],
        )
        .unwrap();
        let a1 = catalog.addon(&sku("A1")).unwrap();
        assert!(a1.incompatible_skus.contains(&sku("GHOST")));
    }

    #[test]
    fn addons_for_keeps_catalog_order() {
        let catalog = Catalog::build(
            vec![product("P1", "tents", 100), product("P2", "tents", 100)],
            vec![
                addon("A1", &["P1"], &[]),
                addon("A2", &["P2"], &[]),
                addon("A3", &["P1", "P2"], &[]),
            ],
            vec![],
            vec![],
        )
        .unwrap();

        let p1 = sku("P1");
        let scoped: Vec<&str> = catalog
            .addons_for(&p1)
            .map(|a| a.sku.as_str())
            .collect();
        assert_eq!(scoped, ["A1", "A3"]);
    }

    #[test]
    fn empty_catalog_is_inert() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.products().is_empty());
        assert!(catalog.product_categories().is_empty());
    }
}
