//! The selection engine.
//!
//! State transitions are single-threaded and synchronous: the presentation
//! layer owns the only mutable reference and dispatches one intent at a
//! time. The engine performs no I/O and never fails in a user-visible way:
//! invalid intents are absorbed as no-ops (the UI only ever offers
//! catalog-valid SKUs, but the engine re-validates independently).

use std::collections::BTreeSet;
use std::sync::Arc;

use camocpq_catalog::{Addon, Catalog, Product};
use camocpq_core::{Cents, Sku};

/// Holds the current product/add-on selection and derives, on demand, the
/// compatible add-on list, the disabled add-ons, and the running total.
///
/// Invariants maintained across every operation:
/// - every selected add-on attaches to the currently selected product;
/// - no product selected implies no add-ons selected;
/// - an add-on conflicting with an *already selected* add-on cannot be newly
///   added (existing selections are never retroactively evicted).
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: Arc<Catalog>,
    selected_product: Option<Sku>,
    selected_addons: BTreeSet<Sku>,
}

impl SelectionEngine {
    /// Create an engine over a loaded catalog, with an empty selection.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selected_product: None,
            selected_addons: BTreeSet::new(),
        }
    }

    /// An engine over an empty catalog: every operation is a no-op and every
    /// derived read is empty/zero. Used until the catalog provider resolves
    /// (or when it fails).
    pub fn inert() -> Self {
        Self::new(Arc::new(Catalog::empty()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_product_sku(&self) -> Option<&Sku> {
        self.selected_product.as_ref()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product
            .as_ref()
            .and_then(|sku| self.catalog.product(sku))
    }

    pub fn selected_addon_skus(&self) -> &BTreeSet<Sku> {
        &self.selected_addons
    }

    /// Select a product. Unknown SKUs are a no-op. Add-ons that do not
    /// attach to the new product are silently dropped; switching products is
    /// expected to shed them.
    pub fn select_product(&mut self, sku: &Sku) {
        if self.catalog.product(sku).is_none() {
            tracing::debug!(%sku, "select_product ignored: unknown SKU");
            return;
        }

        self.selected_product = Some(sku.clone());
        let allowed: BTreeSet<Sku> = self.catalog.addons_for(sku).map(|a| a.sku.clone()).collect();
        self.selected_addons.retain(|addon_sku| allowed.contains(addon_sku));
    }

    /// Clear the product selection; the add-on set empties with it.
    pub fn clear_product(&mut self) {
        self.selected_product = None;
        self.selected_addons.clear();
    }

    /// Toggle an add-on. No-op unless a product is selected and the add-on
    /// is scoped to it. Removal is always permitted; addition is rejected
    /// while the add-on is disabled by a current selection.
    pub fn toggle_addon(&mut self, sku: &Sku) {
        let Some(product_sku) = self.selected_product.as_ref() else {
            tracing::debug!(%sku, "toggle_addon ignored: no product selected");
            return;
        };
        let scoped = self
            .catalog
            .addon(sku)
            .is_some_and(|a| a.attaches_to(product_sku));
        if !scoped {
            tracing::debug!(%sku, "toggle_addon ignored: not scoped to selected product");
            return;
        }

        if self.selected_addons.contains(sku) {
            self.selected_addons.remove(sku);
            return;
        }
        if self.disabled_skus().contains(sku) {
            tracing::debug!(%sku, "toggle_addon rejected: disabled by current selection");
            return;
        }
        self.selected_addons.insert(sku.clone());
    }

    /// Empty the add-on selection; the product selection is unchanged.
    pub fn clear_addons(&mut self) {
        self.selected_addons.clear();
    }

    /// Add-ons scoped to the selected product, in catalog order. Empty when
    /// no product is selected.
    pub fn product_scoped_addons(&self) -> Vec<&Addon> {
        match self.selected_product.as_ref() {
            Some(product_sku) => self.catalog.addons_for(product_sku).collect(),
            None => Vec::new(),
        }
    }

    /// SKUs disabled for *new* selection: the union of the incompatible
    /// lists of every currently selected add-on.
    ///
    /// Incompatibility is directional-additive and evaluated strictly from
    /// the set already chosen. It blocks adding, it never evicts; a
    /// symmetric re-check over the whole set would change observable
    /// behavior.
    pub fn disabled_skus(&self) -> BTreeSet<Sku> {
        self.selected_addons
            .iter()
            .filter_map(|sku| self.catalog.addon(sku))
            .flat_map(|a| a.incompatible_skus.iter().cloned())
            .collect()
    }

    /// Selected add-ons, in catalog order.
    pub fn selected_addons(&self) -> Vec<&Addon> {
        self.catalog
            .addons()
            .iter()
            .filter(|a| self.selected_addons.contains(&a.sku))
            .collect()
    }

    /// Selected product price (0 if none) plus the prices of every selected
    /// add-on, accumulated in exact integer cents.
    pub fn total(&self) -> Cents {
        let product_price = self
            .selected_product()
            .map(|p| p.unit_price)
            .unwrap_or(Cents::ZERO);
        self.selected_addons
            .iter()
            .filter_map(|sku| self.catalog.addon(sku))
            .fold(product_price, |acc, a| acc.saturating_add(a.unit_price))
    }
}
