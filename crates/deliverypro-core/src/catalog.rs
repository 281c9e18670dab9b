//! # Catalog Module
//!
//! In-memory product catalog: the storefront menu queries and the operator
//! menu-management edits.
//!
//! All data lives in the owning state container; this module only knows how
//! to query and mutate a product list. There is no persistence anywhere in
//! the product, so "the catalog" is whatever the session was seeded with.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::{validate_price_cents, validate_product_name};

// =============================================================================
// Catalog
// =============================================================================

/// The product catalog for one restaurant.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from a product list. Order is preserved: it drives
    /// the menu section order on the storefront.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products, in menu order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Category names in first-appearance order, deduplicated.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Products in one category, in menu order.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// The menu grouped into sections, one per category.
    pub fn grouped(&self) -> Vec<(String, Vec<&Product>)> {
        self.categories()
            .into_iter()
            .map(|category| {
                let items = self.by_category(&category);
                (category, items)
            })
            .collect()
    }

    /// Products flagged popular (the storefront highlights section).
    pub fn popular(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.popular).collect()
    }

    /// Case-insensitive search over name and description.
    ///
    /// An empty or blank query returns the full menu.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Number of products currently orderable.
    pub fn available_count(&self) -> usize {
        self.products.iter().filter(|p| p.available).count()
    }

    /// Number of products flagged unavailable.
    pub fn unavailable_count(&self) -> usize {
        self.products.len() - self.available_count()
    }

    /// Applies a menu-management edit to one product.
    ///
    /// Absent fields are left untouched; `image_url` uses a double Option so
    /// the operator can also clear an image (`Some(None)`).
    ///
    /// ## Errors
    /// - `ProductNotFound` for an unknown id
    /// - `Validation` for a blank name or negative price
    pub fn update(&mut self, id: &str, update: MenuItemUpdate) -> CoreResult<&Product> {
        if let Some(name) = &update.name {
            validate_product_name(name)?;
        }
        if let Some(price_cents) = update.price_cents {
            validate_price_cents(price_cents)?;
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price_cents) = update.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = image_url;
        }
        if let Some(available) = update.available {
            product.available = available;
        }

        Ok(product)
    }
}

// =============================================================================
// Menu Item Update
// =============================================================================

/// Partial update for one menu item, as sent by the menu-management form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    /// `Some(None)` clears the image; absent leaves it untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    pub available: Option<bool>,
}

// =============================================================================
// Unit Tests
// =============================================================================
